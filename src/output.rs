use crate::error::Error;
use crate::sample_map::SampleMap;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Compact JSON formatter that escapes everything outside printable ASCII as
/// `\uXXXX`, using surrogate pairs above the BMP.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Encode the map as a single line of ASCII JSON with no trailing newline.
pub fn to_json(map: &SampleMap) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, AsciiFormatter);
    map.serialize(&mut serializer)?;
    Ok(buf)
}

pub fn to_json_string(map: &SampleMap) -> Result<String, Error> {
    let bytes = to_json(map)?;
    String::from_utf8(bytes).map_err(|err| Error::Json(serde::ser::Error::custom(err)))
}

/// Where the document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    /// `-` means stdout; anything else is a file path.
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(value))
        }
    }

    fn path(&self) -> &Path {
        match self {
            OutputTarget::File(path) => path,
            OutputTarget::Stdout => Path::new("<stdout>"),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

/// Encode fully, then write. Returns the number of bytes written.
pub fn write_map(map: &SampleMap, target: &OutputTarget) -> Result<usize, Error> {
    let bytes = to_json(map)?;
    let write_err = |source: io::Error| Error::OutputWrite {
        path: target.path().to_path_buf(),
        source,
    };

    match target {
        OutputTarget::File(path) => fs::write(path, &bytes).map_err(write_err)?,
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&bytes).map_err(write_err)?;
            handle.flush().map_err(write_err)?;
        }
    }

    info!("Wrote {} bytes to {}", bytes.len(), target);
    Ok(bytes.len())
}
