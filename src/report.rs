//! Classification of rsync's textual report

use std::fmt;

/// Entries shown before the remainder is summarized
pub const MAX_LISTED_CHANGES: usize = 20;

/// First characters of an itemized change line (`--itemize-changes`)
const ITEMIZE_MARKERS: &[char] = &['>', '<', 'c', 'h', '*'];

/// File-type column of an itemized change line
const ITEMIZE_FILE_TYPES: &[char] = &['f', 'd', 'L', 'D', 'S'];

/// What a successful rsync run reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeReport {
	/// Itemized change lines, in output order
	FilesChanged(Vec<String>),

	/// Transfer statistics block, when nothing was itemized
	Statistics(Vec<String>),

	/// Nothing needed transfer
	InSync,
}

/// Whether `line` is one entry of rsync's itemized change output.
///
/// `*deleting` lines count; plain messages that merely start with a marker
/// letter (`created directory ...`) do not.
pub fn is_itemized_change(line: &str) -> bool {
	let mut chars = line.chars();
	match (chars.next(), chars.next()) {
		(Some('*'), Some(_)) => true,
		(Some(marker), Some(kind)) => {
			ITEMIZE_MARKERS.contains(&marker) && ITEMIZE_FILE_TYPES.contains(&kind)
		}
		_ => false,
	}
}

fn is_statistics_start(line: &str) -> bool {
	line.contains("Number of files") || line.contains("Total file size")
}

fn is_statistics_line(line: &str) -> bool {
	line.contains(':') || line.starts_with("sent ") || line.starts_with("total size")
}

/// Classify rsync's stdout.
///
/// Itemized changes win; otherwise the statistics block from `Number of
/// files` / `Total file size` onward; otherwise the pair was already in sync.
pub fn classify(stdout: &str) -> ChangeReport {
	let changes: Vec<String> =
		stdout.lines().filter(|l| is_itemized_change(l)).map(|l| l.trim_end().to_string()).collect();
	if !changes.is_empty() {
		return ChangeReport::FilesChanged(changes);
	}

	let mut stats = Vec::new();
	let mut in_stats = false;
	for line in stdout.lines().map(str::trim) {
		if is_statistics_start(line) {
			in_stats = true;
			stats.push(line.to_string());
		} else if in_stats && is_statistics_line(line) {
			stats.push(line.to_string());
		}
	}
	if !stats.is_empty() {
		return ChangeReport::Statistics(stats);
	}

	ChangeReport::InSync
}

impl fmt::Display for ChangeReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ChangeReport::FilesChanged(entries) => {
				write!(f, "Files changed ({}):", entries.len())?;
				for entry in entries.iter().take(MAX_LISTED_CHANGES) {
					write!(f, "\n  {}", entry)?;
				}
				if entries.len() > MAX_LISTED_CHANGES {
					write!(f, "\n  ... and {} more", entries.len() - MAX_LISTED_CHANGES)?;
				}
				Ok(())
			}
			ChangeReport::Statistics(lines) => {
				write!(f, "Transfer statistics:")?;
				for line in lines {
					write!(f, "\n  {}", line)?;
				}
				Ok(())
			}
			ChangeReport::InSync => write!(f, "No files needed transfer"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_itemized_lines_in_order() {
		let out = "sending incremental file list\n>f+++++++ foo.txt\n<f.st...... bar.txt\n\nsent 100 bytes  received 20 bytes\n";
		assert_eq!(
			classify(out),
			ChangeReport::FilesChanged(vec![
				">f+++++++ foo.txt".to_string(),
				"<f.st...... bar.txt".to_string()
			])
		);
	}

	#[test]
	fn test_sent_line_alone_is_in_sync() {
		assert_eq!(classify("sent 100 bytes  received 20 bytes\n"), ChangeReport::InSync);
		assert_eq!(classify(""), ChangeReport::InSync);
	}

	#[test]
	fn test_statistics_fallback() {
		let out = "sending incremental file list\n\nNumber of files: 12 (reg: 10, dir: 2)\nNumber of regular files transferred: 0\nTotal file size: 4,096 bytes\n\nsent 310 bytes  received 19 bytes  658.00 bytes/sec\ntotal size is 4,096  speedup is 12.45\n";
		match classify(out) {
			ChangeReport::Statistics(lines) => {
				assert_eq!(lines[0], "Number of files: 12 (reg: 10, dir: 2)");
				assert!(lines.iter().any(|l| l.starts_with("sent ")));
				assert!(lines.iter().any(|l| l.starts_with("total size")));
				assert!(!lines.iter().any(|l| l.contains("incremental")));
			}
			other => panic!("expected statistics, got {:?}", other),
		}
	}

	#[test]
	fn test_marker_recognition() {
		assert!(is_itemized_change("cd+++++++++ newdir/"));
		assert!(is_itemized_change("*deleting   old.txt"));
		assert!(is_itemized_change("hf+++++++++ link"));
		assert!(!is_itemized_change("created directory /dst"));
		assert!(!is_itemized_change("sending incremental file list"));
		assert!(!is_itemized_change(">"));
	}

	#[test]
	fn test_display_caps_listing() {
		let entries: Vec<String> = (0..25).map(|i| format!(">f+++++++ file{}", i)).collect();
		let text = ChangeReport::FilesChanged(entries).to_string();
		assert!(text.starts_with("Files changed (25):"));
		assert!(text.contains("file19"));
		assert!(!text.contains("file20"));
		assert!(text.ends_with("... and 5 more"));
	}
}

// vim: ts=4
