use gzshard::SplitError;
use gzshard::relay;
use gzshard::source::{CountingReader, read_lines};
use gzshard::testing::gz_bytes;
use std::io::{Cursor, Read};

/// Decode `data` (raw, will be gzip'd) through the source with a queue big
/// enough to never block, returning the records and the summary.
fn decode(data: &[u8]) -> anyhow::Result<(Vec<Vec<u8>>, gzshard::source::SourceSummary)> {
    let compressed = gz_bytes(data)?;
    let (tx, rx) = relay::bounded(1024);
    let summary = read_lines(Cursor::new(compressed), tx)?;
    let mut records = Vec::new();
    while let Some(record) = rx.recv() {
        records.push(record);
    }
    Ok((records, summary))
}

#[test]
fn test_records_keep_their_delimiters() -> anyhow::Result<()> {
    let (records, summary) = decode(b"a\nb\nc\n")?;
    assert_eq!(records, [b"a\n".to_vec(), b"b\n".to_vec(), b"c\n".to_vec()]);
    assert_eq!(summary.lines, 3);
    assert_eq!(summary.bytes, 6);
    Ok(())
}

#[test]
fn test_final_partial_line_is_emitted_once() -> anyhow::Result<()> {
    let (records, summary) = decode(b"a\nb")?;
    assert_eq!(records, [b"a\n".to_vec(), b"b".to_vec()]);
    assert_eq!(summary.lines, 2);
    assert_eq!(summary.bytes, 3);
    Ok(())
}

#[test]
fn test_empty_stream_yields_nothing() -> anyhow::Result<()> {
    let (records, summary) = decode(b"")?;
    assert!(records.is_empty());
    assert_eq!(summary.lines, 0);
    assert_eq!(summary.bytes, 0);
    Ok(())
}

#[test]
fn test_bad_header_fails_with_decompress_error() {
    let (tx, _rx) = relay::bounded(16);
    let err = read_lines(Cursor::new(b"not gzip at all".to_vec()), tx).unwrap_err();
    assert!(matches!(err, SplitError::Decompress(_)));
}

#[test]
fn test_truncated_stream_fails_but_keeps_emitted_records() -> anyhow::Result<()> {
    let mut data = Vec::new();
    for i in 0..2000 {
        data.extend_from_slice(format!("some fairly long line number {i}\n").as_bytes());
    }
    let compressed = gz_bytes(&data)?;
    let truncated = compressed[..compressed.len() / 2].to_vec();

    let (tx, rx) = relay::bounded(4096);
    let err = read_lines(Cursor::new(truncated), tx).unwrap_err();
    assert!(matches!(err, SplitError::Decompress(_)));

    // Whatever was emitted before the failure is a clean prefix of the input.
    let mut emitted = Vec::new();
    while let Some(record) = rx.recv() {
        emitted.extend_from_slice(&record);
    }
    assert!(data.starts_with(&emitted));
    Ok(())
}

#[test]
fn test_counting_reader_tracks_and_notifies() -> anyhow::Result<()> {
    use std::cell::Cell;
    use std::rc::Rc;

    let last = Rc::new(Cell::new(0u64));
    let last_seen = Rc::clone(&last);
    let mut reader = CountingReader::with_notify(
        Cursor::new(vec![0u8; 300]),
        Box::new(move |total| last_seen.set(total)),
    );
    let mut sink = Vec::new();
    reader.read_to_end(&mut sink)?;
    assert_eq!(sink.len(), 300);
    assert_eq!(reader.bytes_read(), 300);
    assert_eq!(last.get(), 300);
    Ok(())
}
