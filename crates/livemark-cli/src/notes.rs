use livemark_engine::{HeadingResolution, ResolveError, Resolution, Resolver};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Answers wikilink and embed lookups from a folder of markdown notes.
pub struct NotesDir {
    root: PathBuf,
}

impl NotesDir {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// `note` and `folder/note` map to `note.md`; explicit extensions are kept.
    fn note_path(target: &str) -> RelativePathBuf {
        let path = RelativePath::new(target);
        match path.extension() {
            Some(_) => path.to_relative_path_buf(),
            None => path.with_extension("md"),
        }
    }

    /// Read a note, `Ok(None)` when it does not exist.
    fn read_note(&self, target: &str) -> Result<Option<String>, ResolveError> {
        read_file(&Self::note_path(target), &self.root).map_err(|source| ResolveError::Io {
            target: target.to_string(),
            source,
        })
    }
}

fn read_file(relative_path: &RelativePath, notes_root: &Path) -> io::Result<Option<String>> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Ok(None);
    }
    fs::read_to_string(&absolute_path).map(Some)
}

/// Level and title of an ATX heading line.
fn heading_line(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    let rest = &line[hashes..];
    if !(1..=6).contains(&hashes) || !(rest.is_empty() || rest.starts_with([' ', '\t'])) {
        return None;
    }
    Some((hashes as u8, rest.trim()))
}

/// The section under `heading`, up to the next heading of the same or a
/// higher level.
fn find_section(content: &str, heading: &str) -> Option<(u8, String)> {
    let mut lines = content.lines();
    let level = lines.by_ref().find_map(|line| {
        heading_line(line)
            .filter(|(_, title)| title.eq_ignore_ascii_case(heading))
            .map(|(level, _)| level)
    })?;

    let body: Vec<&str> = lines
        .take_while(|line| heading_line(line).is_none_or(|(l, _)| l > level))
        .collect();
    Some((level, body.join("\n").trim().to_string()))
}

impl Resolver for NotesDir {
    fn resolve_wikilink(&self, target: &str) -> Result<Option<Resolution>, ResolveError> {
        Ok(self.read_note(target)?.map(|content| Resolution {
            exists: true,
            content: Some(content),
        }))
    }

    fn resolve_image(&self, src: &str) -> String {
        RelativePath::new(src).to_path(&self.root).display().to_string()
    }

    fn resolve_heading(
        &self,
        note: &str,
        heading: &str,
    ) -> Result<Option<HeadingResolution>, ResolveError> {
        let Some(content) = self.read_note(note)? else {
            return Ok(None);
        };
        let section = find_section(&content, heading);
        Ok(Some(HeadingResolution {
            exists: section.is_some(),
            heading_level: section.as_ref().map(|(level, _)| *level),
            content: section.map(|(_, body)| body),
        }))
    }
}
