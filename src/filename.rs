use crate::error::InputError;
use crate::session::InputSession;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

pub const MAX_FILE_NAME: usize = 80;

/// the only kind of file a story may open without asking
pub const AUX_EXTENSION: &str = "aux";

/// What the story wants a file for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePurpose {
    Save,
    Restore,
    Script,
    Record,
    Playback,
    SaveAux,
    LoadAux,
    /// the story picked the name itself; the user isn't asked
    NoPrompt,
}

impl FilePurpose {
    /// whether an existing file would be overwritten, and so needs an ok
    pub fn writes(self) -> bool {
        matches!(
            self,
            FilePurpose::Save | FilePurpose::SaveAux | FilePurpose::Record
        )
    }
}

/// The last component of `name`, or `None` if that doesn't name a file.
pub fn final_component(name: &str) -> Option<&str> {
    let last = name
        .rsplit(|c| c == '/' || c == MAIN_SEPARATOR)
        .next()
        .unwrap_or(name);
    match last {
        "" | "." | ".." => None,
        _ => Some(last),
    }
}

/// `name` moved into `root`: whatever directories it mentions are dropped.
pub fn sandboxed(root: &Path, name: &str) -> Option<PathBuf> {
    final_component(name).map(|f| root.join(f))
}

fn bounded(name: &str) -> &str {
    if name.len() <= MAX_FILE_NAME {
        return name;
    }
    let mut end = MAX_FILE_NAME;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

impl<'a> InputSession<'a> {
    /// Work out which file to use, asking the user unless a restore is
    /// already under way or the story asked for no prompt.
    ///
    /// `Ok(None)` means there is no file to use: the name was too long,
    /// the story tried to open something other than an aux file
    /// unprompted, or the user didn't want to overwrite.
    pub fn read_file_name(
        &mut self,
        default: &str,
        purpose: FilePurpose,
    ) -> Result<Option<PathBuf>, InputError> {
        if self.restore_mode {
            return Ok(Some(PathBuf::from(default)));
        }

        let name = if purpose == FilePurpose::NoPrompt {
            let ext = Path::new(default).extension().and_then(|e| e.to_str());
            if ext != Some(AUX_EXTENSION) {
                log::warn!("blocked unprompted access of {}", default);
                self.screen.warn(&format!(
                    "Blocked unprompted access of {}. Should only be {} files.",
                    default, AUX_EXTENSION
                ))?;
                return Ok(None);
            }
            bounded(default).to_string()
        } else {
            let shown = match &self.restricted_path {
                Some(_) => final_component(default).unwrap_or(default),
                None => default,
            };
            let prompt = format!("Please enter a filename [{}]: ", shown);
            let answer = self.read_misc_line(&prompt)?;
            if answer.is_empty() {
                bounded(default).to_string()
            } else if answer.len() > MAX_FILE_NAME {
                self.screen.print("Filename too long\n")?;
                return Ok(None);
            } else {
                answer
            }
        };

        let path = match &self.restricted_path {
            Some(root) => match sandboxed(root, &name) {
                Some(p) => p,
                None => {
                    log::warn!("no file name left in {:?} once confined", name);
                    return Ok(None);
                }
            },
            None => PathBuf::from(name),
        };

        if purpose.writes() && path.exists() {
            let answer = self.read_misc_line("Overwrite existing file? ")?;
            if !answer.starts_with(['y', 'Y']) {
                return Ok(None);
            }
        }
        log::debug!("file for {:?}: {}", purpose, path.display());
        Ok(Some(path))
    }
}
