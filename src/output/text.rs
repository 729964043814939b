//! Plain text report.
//!
//! One header line per duplicate group followed by its paths, sorted and
//! tab-indented:
//!
//! ```text
//! txt/f4f1c3a9e/10 B: 2 duplicate(s)
//! 	/a/1.txt
//! 	/a/2.txt
//! 	/b/1.txt
//! ```

use std::io;

use crate::duplicates::DuplicateGroup;

/// Rough size of one report line, used to pre-size the buffer.
const BYTES_PER_LINE_GUESS: usize = 128;

/// Text output formatter.
pub struct TextOutput<'a> {
    groups: &'a [DuplicateGroup],
}

impl<'a> TextOutput<'a> {
    /// Create a new text output formatter.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self { groups }
    }

    /// Render the whole report.
    #[must_use]
    pub fn render(&self) -> String {
        let lines: usize = self.groups.iter().map(|g| g.len() + 1).sum();
        let mut out = String::with_capacity(lines * BYTES_PER_LINE_GUESS);

        for group in self.groups {
            out.push_str(&format!(
                "{}: {} duplicate(s)\n",
                group.digest,
                group.duplicate_count()
            ));
            for path in group.sorted_paths() {
                out.push('\t');
                out.push_str(&path.to_string_lossy());
                out.push('\n');
            }
        }

        out
    }

    /// Write the report to the given writer.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if writing fails.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.render().as_bytes())?;
        writer.flush()
    }
}

/// Banner printed before a report sent to standard output.
#[must_use]
pub fn stdout_banner(run_id: &str) -> String {
    format!(
        "\n==========================\nReport (run id {run_id})\n==========================\n"
    )
}
