//! Retraction batch output
//!
//! Every retracted candidate becomes one update statement that overwrites the
//! stored genomic accession with the `-` sentinel. The store has no candidate
//! key, so the statement matches on (gene id, accession). Each statement is
//! followed by a `go` batch terminator line.
//!
//! The batch is only serialized here; the load pipeline executes it.

use crate::policy::Selection;
use radar_common::{Error, Result};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Value written over a retracted accession
pub const SENTINEL: &str = "-";

/// Line that ends each statement in the batch
pub const BATCH_TERMINATOR: &str = "go";

/// One corrective update for a retracted candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetractionCommand<'a> {
    pub table: &'a str,
    pub gene_id: &'a str,
    pub sequence_id: &'a str,
}

/// Quote a string literal, doubling embedded quotes
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

impl fmt::Display for RetractionCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "update {} set genomic = {} where geneId = {} and genomic = {}",
            self.table,
            quote(SENTINEL),
            quote(self.gene_id),
            quote(self.sequence_id)
        )
    }
}

/// Write one statement and its terminator line
fn write_command<W: Write>(out: &mut W, command: &RetractionCommand<'_>) -> io::Result<()> {
    writeln!(out, "{}", command)?;
    writeln!(out, "{}", BATCH_TERMINATOR)
}

/// Serializes retraction commands to a writer
pub struct RetractionEmitter<W: Write> {
    out: W,
    table: String,
    commands_written: usize,
}

impl<W: Write> RetractionEmitter<W> {
    pub fn new(out: W, table: impl Into<String>) -> Self {
        Self {
            out,
            table: table.into(),
            commands_written: 0,
        }
    }

    /// Write a statement for every retracted candidate of a selection
    ///
    /// Nothing is written for the canonical candidate. Returns the number of
    /// statements written.
    pub fn emit_selection(&mut self, selection: &Selection<'_>) -> io::Result<usize> {
        for candidate in &selection.retracted {
            let command = RetractionCommand {
                table: &self.table,
                gene_id: selection.gene_id,
                sequence_id: &candidate.sequence_id,
            };
            write_command(&mut self.out, &command)?;
            self.commands_written += 1;
        }
        Ok(selection.retracted.len())
    }

    pub fn commands_written(&self) -> usize {
        self.commands_written
    }

    /// Flush and hand back the writer
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// The update batch file, written atomically
///
/// Output goes to a sibling `.tmp` file that is renamed onto the target path
/// by [`UpdateFile::commit`]. Dropping an uncommitted file removes the
/// temporary file, so a failed run never leaves a partial batch behind.
pub struct UpdateFile {
    path: PathBuf,
    tmp_path: PathBuf,
    emitter: Option<RetractionEmitter<BufWriter<File>>>,
}

impl UpdateFile {
    /// Create the temporary output file next to `path`
    pub fn create(path: &Path, table: &str) -> Result<Self> {
        let tmp_path = temporary_path(path);
        let file = File::create(&tmp_path).map_err(|e| Error::output_write(path, e))?;

        debug!(path = %tmp_path.display(), "Opened temporary update file");

        Ok(Self {
            path: path.to_path_buf(),
            tmp_path,
            emitter: Some(RetractionEmitter::new(BufWriter::new(file), table)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the retractions of one gene's selection
    pub fn write_selection(&mut self, selection: &Selection<'_>) -> Result<usize> {
        let path = &self.path;
        match self.emitter.as_mut() {
            Some(emitter) => emitter
                .emit_selection(selection)
                .map_err(|e| Error::output_write(path, e)),
            None => Err(Error::output_write(
                path,
                io::Error::new(io::ErrorKind::Other, "update file already committed"),
            )),
        }
    }

    pub fn commands_written(&self) -> usize {
        self.emitter
            .as_ref()
            .map(RetractionEmitter::commands_written)
            .unwrap_or(0)
    }

    /// Flush, sync and move the batch into place; returns statements written
    pub fn commit(mut self) -> Result<usize> {
        let emitter = match self.emitter.take() {
            Some(emitter) => emitter,
            None => return Ok(0),
        };
        let written = emitter.commands_written();

        let writer = emitter
            .finish()
            .map_err(|e| Error::output_write(&self.path, e))?;
        let file = writer
            .into_inner()
            .map_err(|e| Error::output_write(&self.path, e.into_error()))?;
        file.sync_all()
            .map_err(|e| Error::output_write(&self.path, e))?;
        drop(file);

        fs::rename(&self.tmp_path, &self.path).map_err(|e| Error::output_write(&self.path, e))?;

        Ok(written)
    }
}

impl Drop for UpdateFile {
    fn drop(&mut self) {
        // A committed batch has already been renamed away
        if self.tmp_path.exists() {
            if let Err(e) = fs::remove_file(&self.tmp_path) {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!(
                        path = %self.tmp_path.display(),
                        error = %e,
                        "Failed to remove temporary update file"
                    );
                }
            }
        }
    }
}

/// `<path>.tmp` in the same directory, so the final rename stays on one filesystem
fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{AssemblyTier, SequenceCandidate};
    use crate::policy::select;

    const TABLE: &str = "DP_EntrezGene_Accession";

    #[test]
    fn test_command_format() {
        let command = RetractionCommand {
            table: TABLE,
            gene_id: "G1",
            sequence_id: "NW_001",
        };

        assert_eq!(
            command.to_string(),
            r#"update DP_EntrezGene_Accession set genomic = "-" where geneId = "G1" and genomic = "NW_001""#
        );
    }

    #[test]
    fn test_command_escapes_quotes() {
        let command = RetractionCommand {
            table: TABLE,
            gene_id: "G\"1",
            sequence_id: "NW_001",
        };

        assert!(command.to_string().contains(r#"geneId = "G""1""#));
    }

    #[test]
    fn test_emit_selection_skips_canonical() {
        let set = vec![
            SequenceCandidate::with_tier("NW_001", AssemblyTier::Secondary),
            SequenceCandidate::with_tier("NT_002", AssemblyTier::Primary),
            SequenceCandidate::with_tier("NW_003", AssemblyTier::Primary),
        ];
        let selection = select("G1", &set).unwrap();

        let mut emitter = RetractionEmitter::new(Vec::new(), TABLE);
        assert_eq!(emitter.emit_selection(&selection).unwrap(), 2);
        assert_eq!(emitter.commands_written(), 2);

        let text = String::from_utf8(emitter.finish().unwrap()).unwrap();
        let expected = concat!(
            "update DP_EntrezGene_Accession set genomic = \"-\" where geneId = \"G1\" and genomic = \"NW_001\"\n",
            "go\n",
            "update DP_EntrezGene_Accession set genomic = \"-\" where geneId = \"G1\" and genomic = \"NW_003\"\n",
            "go\n",
        );
        assert_eq!(text, expected);
        assert!(!text.contains("NT_002"));
    }

    #[test]
    fn test_emit_single_candidate_writes_nothing() {
        let set = vec![SequenceCandidate::with_tier("NT_300", AssemblyTier::Primary)];
        let selection = select("G4", &set).unwrap();

        let mut emitter = RetractionEmitter::new(Vec::new(), TABLE);
        assert_eq!(emitter.emit_selection(&selection).unwrap(), 0);
        assert!(emitter.finish().unwrap().is_empty());
    }

    #[test]
    fn test_update_file_commit_moves_into_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("update.sql");

        let set = vec![
            SequenceCandidate::with_tier("NT_010", AssemblyTier::Secondary),
            SequenceCandidate::with_tier("NT_020", AssemblyTier::Primary),
        ];
        let selection = select("G2", &set).unwrap();

        let mut file = UpdateFile::create(&path, TABLE).unwrap();
        assert!(!path.exists(), "Target must not appear before commit");
        file.write_selection(&selection).unwrap();
        assert_eq!(file.commands_written(), 1);
        assert_eq!(file.commit().unwrap(), 1);

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains(r#"geneId = "G2" and genomic = "NT_010""#));
        assert!(!dir.path().join("update.sql.tmp").exists());
    }

    #[test]
    fn test_update_file_dropped_without_commit_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("update.sql");

        let file = UpdateFile::create(&path, TABLE).unwrap();
        assert!(dir.path().join("update.sql.tmp").exists());
        drop(file);

        assert!(!path.exists());
        assert!(!dir.path().join("update.sql.tmp").exists());
    }

    #[test]
    fn test_update_file_missing_directory_is_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("update.sql");

        match UpdateFile::create(&path, TABLE) {
            Err(Error::OutputWrite { path: failed, .. }) => assert_eq!(failed, path),
            Err(other) => panic!("Expected OutputWrite, got {:?}", other),
            Ok(_) => panic!("Expected OutputWrite, got Ok"),
        }
    }

    #[test]
    fn test_temporary_path_is_sibling() {
        assert_eq!(
            temporary_path(Path::new("/data/reports/radarPreprocess.sql")),
            PathBuf::from("/data/reports/radarPreprocess.sql.tmp")
        );
    }
}
