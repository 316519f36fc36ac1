//! Support for reading and writing the file formats used with formal contexts.
//!
//! ### Observations (reading)
//!
//! An observation file is a text file with one object per line.
//! Each line contains an object name, a tab, and a comma-separated list of attribute names.
//! The attribute list may be empty.
//! The file may be gzip-compressed.
//!
//! Lines starting with `#` are comments.
//! Comment lines at the start of the file are header lines.
//! A header line of the form `#attributes<TAB>a,b,c` declares the attribute universe.
//!
//! * [`is_comment_line`]: Check if a buffer contains a comment line.
//! * [`read_header_lines`]: Read all successive header lines from a reader.
//! * [`attributes_from_header`]: Find the attribute universe in the header lines.
//! * [`parse_observation`]: Parse an observation line.
//! * [`read_observations`]: Read all observations from a reader.
//!
//! ### DOT (writing)
//!
//! Hasse diagrams are written as DOT digraphs in the edge-list form `"source" -> "target"`.
//!
//! * [`write_dot_header`]: Write the opening line of a digraph.
//! * [`write_dot_edge`]: Write an edge line.
//! * [`write_dot_footer`]: Write the closing line of a digraph.
//!
//! ### JSON (writing)
//!
//! Statistics are reported by building a [`JSONValue`] object and writing it using the [`Display`] trait.
//! [`push_frequency`] reports a frequency that could not be computed as an `"error"` field.

use crate::{utils, LatticeError, Result};

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::Path;


//-----------------------------------------------------------------------------

/// Name of the header field that declares the attribute universe.
pub const ATTRIBUTES_HEADER: &str = "#attributes";

/// Returns `true` if the buffer contains a comment line.
///
/// A comment line starts with `#`.
pub fn is_comment_line(buf: &[u8]) -> bool {
    buf.first() == Some(&b'#')
}

/// Returns `true` if the next line in the reader would be a comment line.
///
/// The reader position is not changed.
/// Returns an I/O error if reading from the reader fails.
pub fn peek_comment_line<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    let buffer = reader.fill_buf()?;
    Ok(is_comment_line(buffer))
}

/// Returns all successive header lines from the reader.
///
/// The returned lines do not contain the trailing newline character.
/// The reader position is advanced past the header lines.
/// Returns an I/O error if reading from the reader fails.
pub fn read_header_lines<R: BufRead>(reader: &mut R) -> io::Result<Vec<String>> {
    let mut headers: Vec<String> = Vec::new();
    while peek_comment_line(reader)? {
        let mut line: Vec<u8> = Vec::new();
        let bytes_read = reader.read_until(b'\n', &mut line)?;
        if bytes_read == 0 {
            break;
        }
        trim_line_end(&mut line);
        headers.push(String::from_utf8_lossy(&line).to_string());
    }
    Ok(headers)
}

/// Returns the attribute universe declared in the header lines, or [`None`] if there is no declaration.
///
/// # Examples
///
/// ```
/// use concept_lattice::formats;
///
/// let headers = vec![String::from("# survey"), String::from("#attributes\tred,green,blue")];
/// let attributes = formats::attributes_from_header(&headers);
/// assert_eq!(attributes, Some(vec![String::from("red"), String::from("green"), String::from("blue")]));
/// ```
pub fn attributes_from_header(headers: &[String]) -> Option<Vec<String>> {
    headers.iter().find_map(|line| {
        let (name, value) = line.split_once('\t')?;
        if name == ATTRIBUTES_HEADER {
            Some(split_list(value))
        } else {
            None
        }
    })
}

// Removes the trailing newline and carriage return.
fn trim_line_end(line: &mut Vec<u8>) {
    while line.last() == Some(&b'\n') || line.last() == Some(&b'\r') {
        line.pop();
    }
}

// Splits a comma-separated list, ignoring empty items and surrounding whitespace.
fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(|item| item.trim()).filter(|item| !item.is_empty()).map(String::from).collect()
}

//-----------------------------------------------------------------------------

/// An object with a list of attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    /// Name of the object.
    pub object: String,
    /// Names of the attributes of the object.
    pub attributes: Vec<String>,
}

/// Parses an observation line.
///
/// The line may end with a newline character.
/// Returns an error if the object name is empty.
///
/// # Examples
///
/// ```
/// use concept_lattice::formats;
///
/// let observation = formats::parse_observation(b"duck\tflies,swims\n").unwrap();
/// assert_eq!(observation.object, "duck");
/// assert_eq!(observation.attributes, vec![String::from("flies"), String::from("swims")]);
///
/// let observation = formats::parse_observation(b"stone").unwrap();
/// assert!(observation.attributes.is_empty());
/// ```
pub fn parse_observation(line: &[u8]) -> Result<Observation> {
    let mut line = line.to_vec();
    trim_line_end(&mut line);
    let line = String::from_utf8_lossy(&line);
    let (object, attributes) = match line.split_once('\t') {
        Some((object, attributes)) => (object.trim(), split_list(attributes)),
        None => (line.trim(), Vec::new()),
    };
    if object.is_empty() {
        return Err(LatticeError::Parse(format!("Missing object name: {}", line)));
    }
    Ok(Observation { object: object.to_string(), attributes })
}

/// Reads all observations from the reader.
///
/// Comment lines and empty lines are skipped.
/// Returns an error if reading fails or if a line cannot be parsed.
pub fn read_observations<R: BufRead>(reader: &mut R) -> Result<Vec<Observation>> {
    let mut result: Vec<Observation> = Vec::new();
    let mut line_num = 0;
    loop {
        let mut line: Vec<u8> = Vec::new();
        let bytes_read = reader.read_until(b'\n', &mut line)?;
        if bytes_read == 0 {
            break;
        }
        line_num += 1;
        trim_line_end(&mut line);
        if line.is_empty() || is_comment_line(&line) {
            continue;
        }
        let observation = parse_observation(&line).map_err(|err| {
            LatticeError::Parse(format!("Line {}: {}", line_num, err))
        })?;
        result.push(observation);
    }
    Ok(result)
}

/// Reads an observation file, which may be gzip-compressed.
///
/// Returns the attribute universe declared in the header, if any, and the observations.
pub fn read_observation_file<P: AsRef<Path>>(filename: P) -> Result<(Option<Vec<String>>, Vec<Observation>)> {
    let mut reader = utils::open_file(filename)?;
    let headers = read_header_lines(&mut reader)?;
    let attributes = attributes_from_header(&headers);
    let observations = read_observations(&mut reader)?;
    Ok((attributes, observations))
}

//-----------------------------------------------------------------------------

/// Writes the opening line of a DOT digraph.
pub fn write_dot_header<T: Write>(output: &mut T) -> io::Result<()> {
    output.write_all(b"digraph {\n")?;
    Ok(())
}

/// Writes a DOT edge line between two labels.
///
/// Quotes and backslashes in the labels are escaped.
pub fn write_dot_edge<T: Write>(source: &str, target: &str, output: &mut T) -> io::Result<()> {
    let line = format!("  \"{}\" -> \"{}\"\n", escape_label(source), escape_label(target));
    output.write_all(line.as_bytes())?;
    Ok(())
}

/// Writes the closing line of a DOT digraph.
pub fn write_dot_footer<T: Write>(output: &mut T) -> io::Result<()> {
    output.write_all(b"}\n")?;
    Ok(())
}

fn escape_label(label: &str) -> String {
    let mut result = String::with_capacity(label.len());
    for c in label.chars() {
        if c == '"' || c == '\\' {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

//-----------------------------------------------------------------------------

/// A structured JSON value.
#[derive(Clone, Debug, PartialEq)]
pub enum JSONValue {
    /// A boolean value.
    Boolean(bool),

    /// A string value.
    String(String),

    /// An integer value.
    Number(usize),

    /// A floating point value.
    Float(f64),

    /// An array of JSON values.
    Array(Vec<JSONValue>),

    /// A JSON object storing a list of JSON values with string names.
    Object(Vec<(String, JSONValue)>),
}

impl Display for JSONValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JSONValue::Boolean(b) => write!(f, "{}", b),
            JSONValue::String(s) => write!(f, "\"{}\"", escape_label(s)),
            JSONValue::Number(n) => write!(f, "{}", n),
            JSONValue::Float(x) => {
                if x.is_finite() {
                    write!(f, "{}", x)
                } else {
                    write!(f, "null")
                }
            },
            JSONValue::Array(v) => {
                write!(f, "[")?;
                let mut first = true;
                for value in v.iter() {
                    if first {
                        first = false;
                    } else {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            },
            JSONValue::Object(v) => {
                write!(f, "{{")?;
                let mut first = true;
                for (key, value) in v.iter() {
                    if first {
                        first = false;
                    } else {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\": {}", key, value)?;
                }
                write!(f, "}}")
            },
        }
    }
}

/// Adds a named frequency to the fields of a JSON object.
///
/// If the frequency could not be computed, the field is left out and the error message is stored in an `"error"` field instead.
/// Only the first error is kept.
///
/// # Examples
///
/// ```
/// use concept_lattice::LatticeError;
/// use concept_lattice::formats::{self, JSONValue};
///
/// let mut fields = Vec::new();
/// formats::push_frequency(&mut fields, "marginal", Ok(0.25));
/// formats::push_frequency(&mut fields, "conditional", Err(LatticeError::DivisionByZero(String::from("empty"))));
/// assert_eq!(JSONValue::Object(fields).to_string(), "{\"marginal\": 0.25, \"error\": \"Division by zero: empty\"}");
/// ```
pub fn push_frequency(fields: &mut Vec<(String, JSONValue)>, name: &str, value: Result<f64>) {
    match value {
        Ok(value) => fields.push((name.to_string(), JSONValue::Float(value))),
        Err(error) => {
            if !fields.iter().any(|(key, _)| key == "error") {
                fields.push((String::from("error"), JSONValue::String(error.to_string())));
            }
        },
    }
}

/// Creates a JSON array of strings.
pub fn json_strings<I, S>(values: I) -> JSONValue
where
    I: IntoIterator<Item = S>,
    S: ToString,
{
    JSONValue::Array(values.into_iter().map(|value| JSONValue::String(value.to_string())).collect())
}

//-----------------------------------------------------------------------------
