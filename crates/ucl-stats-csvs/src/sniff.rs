/*!
# Delimiter Sniffing

Guesses the field separator of a CSV file from a small sample. Each candidate
delimiter is tried in turn and scored by the field count of the header record.
A candidate needs a header of at least two fields with no wider record after
it. At least half the records must match the header width; short rows are
otherwise fine since the reader pads them. The widest accepted split wins.
*/

use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Delimiters considered by the sniffer, in tie-break order
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Used whenever sniffing is inconclusive
pub const DEFAULT_DELIMITER: u8 = b',';

/// Number of bytes read from the head of a file for sniffing
pub const SNIFF_SAMPLE_BYTES: usize = 2048;

/// Minimum share of sampled records that must have the header's width
const MIN_FULL_WIDTH_SHARE: f64 = 0.5;

/// Detect the delimiter of the CSV file at `path`.
///
/// Never fails: unreadable files, empty samples and ambiguous samples all fall
/// back to [`DEFAULT_DELIMITER`].
pub fn detect_delimiter<P: AsRef<Path>>(path: P) -> u8 {
    let path = path.as_ref();
    let (sample, truncated) = match read_sample(path) {
        Ok(sample) => sample,
        Err(e) => {
            debug!("Could not sample {} for sniffing: {}", path.display(), e);
            return DEFAULT_DELIMITER;
        }
    };

    match sniff_delimiter(&sample, truncated) {
        Some(delimiter) => delimiter,
        None => {
            debug!(
                "No consistent delimiter found in {}, defaulting to ','",
                path.display()
            );
            DEFAULT_DELIMITER
        }
    }
}

/// Sniff a delimiter from an in-memory sample.
///
/// `truncated` says the sample was cut from a longer file, in which case the
/// last record may be incomplete and is not counted.
pub fn sniff_delimiter(sample: &str, truncated: bool) -> Option<u8> {
    let mut best: Option<(u8, usize)> = None;

    for &delimiter in &CANDIDATE_DELIMITERS {
        let Some(fields) = consistent_field_count(sample, delimiter, truncated) else {
            continue;
        };
        if best.map_or(true, |(_, widest)| fields > widest) {
            best = Some((delimiter, fields));
        }
    }

    best.map(|(delimiter, _)| delimiter)
}

fn read_sample(path: &Path) -> std::io::Result<(String, bool)> {
    let mut buf = Vec::with_capacity(SNIFF_SAMPLE_BYTES + 1);
    File::open(path)?
        .take(SNIFF_SAMPLE_BYTES as u64 + 1)
        .read_to_end(&mut buf)?;

    let truncated = buf.len() > SNIFF_SAMPLE_BYTES;
    buf.truncate(SNIFF_SAMPLE_BYTES);

    Ok((String::from_utf8_lossy(&buf).into_owned(), truncated))
}

/// Header width under `delimiter`, if the sample is consistent with it
fn consistent_field_count(sample: &str, delimiter: u8, truncated: bool) -> Option<usize> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(sample.as_bytes());

    let mut counts = Vec::new();
    let mut clean_end = true;
    for record in reader.records() {
        match record {
            Ok(record) => counts.push(record.len()),
            Err(_) => {
                clean_end = false;
                break;
            }
        }
    }

    // A cut-off tail record is unreliable
    if truncated && clean_end && counts.len() > 1 {
        counts.pop();
    }

    let width = *counts.first()?;
    if width < 2 || counts.iter().any(|&count| count > width) {
        return None;
    }

    let full = counts.iter().filter(|&&count| count == width).count();
    (full as f64 / counts.len() as f64 >= MIN_FULL_WIDTH_SHARE).then_some(width)
}
