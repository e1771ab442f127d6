//! pyproject.toml parsing and schema.
//!
//! wharf reads a restricted, line-oriented subset of pyproject.toml: the
//! `[project]` table, the `[tool.wharf]` table, and `[[tool.wharf.functions]]`
//! array-of-tables entries. The parser is deliberately permissive - unknown
//! keys and malformed sections are ignored and defaults are filled in, so
//! `parse` is total over any readable input. The only load failure is a
//! missing or unreadable file.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::errors::Error;

/// The configuration file name, fixed at the project root.
pub const CONFIG_NAME: &str = "pyproject.toml";

/// Default Zig entry point, relative to the project root.
pub const DEFAULT_SOURCE_ENTRY: &str = "src/lib.zig";

/// Immutable project configuration snapshot for one build.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Distribution name
    pub name: String,

    /// Distribution version
    pub version: String,

    /// One-line description (becomes the wheel's Summary)
    pub description: String,

    /// Authors, in declaration order
    pub authors: Vec<String>,

    /// License identifier
    pub license: String,

    /// Requires-Python specifier
    pub requires_python: String,

    /// Zig entry point, relative to the project root
    pub source_entry: PathBuf,

    /// Exported functions, in declaration order
    pub functions: Vec<FunctionSpec>,
}

/// One exported function declaration from `[[tool.wharf.functions]]`.
///
/// Declarations are positionally distinct; the parser allows duplicate
/// names (last-opened record receives subsequent keys). This looseness is
/// documented, not accidental - the function list is not a keyed map.
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    /// Exported symbol name
    pub name: String,

    /// Arguments, in declaration order
    pub args: Vec<ArgSpec>,

    /// Zig return type name
    pub returns: String,

    /// Whether the binding releases the GIL around the native call
    pub release_gil: bool,

    /// Docstring for the generated binding
    pub doc: String,
}

impl Default for FunctionSpec {
    fn default() -> Self {
        FunctionSpec {
            name: String::new(),
            args: Vec::new(),
            returns: "i32".to_string(),
            release_gil: true,
            doc: String::new(),
        }
    }
}

/// One function argument: `name:zigType:pyType` in the args mini-grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    /// Argument name
    pub name: String,

    /// Zig-side type name (default `i32`)
    pub zig_type: String,

    /// Python-side type name (default `int`)
    pub py_type: String,
}

/// Parser state: which table the current `key = value` lines belong to.
///
/// Modeled as explicit tagged states so the transition table stays
/// auditable; `open_fn` tracks the most recently appended function record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Project,
    Tool { open_fn: Option<usize> },
}

impl ProjectConfig {
    /// Load the configuration from `<project_dir>/pyproject.toml`.
    ///
    /// Fails only if the file is absent or unreadable; parsing itself
    /// never fails.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(CONFIG_NAME);
        let content = std::fs::read_to_string(&path)
            .map_err(|_| Error::ConfigNotFound(project_dir.to_path_buf()))?;

        Ok(Self::parse(&content, project_dir))
    }

    /// Parse configuration text. Total: malformed input yields defaults.
    pub fn parse(content: &str, project_dir: &Path) -> Self {
        let mut config = Self::defaults_for(project_dir);
        let mut section = Section::None;

        for raw_line in content.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') {
                section = match line {
                    "[project]" => Section::Project,
                    "[tool.wharf]" => Section::Tool { open_fn: None },
                    "[[tool.wharf.functions]]" => {
                        config.functions.push(FunctionSpec::default());
                        Section::Tool {
                            open_fn: Some(config.functions.len() - 1),
                        }
                    }
                    // Any other table closes whatever was open.
                    _ => Section::None,
                };
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = unquote(value.trim());

            match section {
                Section::None => {}
                Section::Project => config.apply_project_key(key, &value),
                Section::Tool { open_fn: None } => {
                    if key == "src" {
                        config.source_entry = PathBuf::from(value);
                    }
                }
                Section::Tool { open_fn: Some(idx) } => {
                    if let Some(func) = config.functions.get_mut(idx) {
                        apply_function_key(func, key, &value);
                    }
                }
            }
        }

        config
    }

    /// The Python module/import name: the distribution name with dashes
    /// replaced by underscores.
    pub fn module_name(&self) -> String {
        self.name.replace('-', "_")
    }

    fn defaults_for(project_dir: &Path) -> Self {
        let name = project_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "untitled".to_string());

        ProjectConfig {
            name,
            version: "0.1.0".to_string(),
            description: String::new(),
            authors: Vec::new(),
            license: String::new(),
            requires_python: ">=3.8".to_string(),
            source_entry: PathBuf::from(DEFAULT_SOURCE_ENTRY),
            functions: Vec::new(),
        }
    }

    fn apply_project_key(&mut self, key: &str, value: &str) {
        match key {
            "name" if !value.is_empty() => self.name = value.to_string(),
            "version" if !value.is_empty() => self.version = value.to_string(),
            "description" => self.description = value.to_string(),
            "license" => self.license = value.to_string(),
            "requires-python" => self.requires_python = value.to_string(),
            "authors" => self.authors = parse_string_list(value),
            _ => {}
        }
    }
}

fn apply_function_key(func: &mut FunctionSpec, key: &str, value: &str) {
    match key {
        "name" => func.name = value.to_string(),
        "args" => func.args = parse_args(value),
        "returns" => func.returns = value.to_string(),
        "gil" => {
            // Anything other than a recognizable boolean keeps the default.
            match value {
                "true" => func.release_gil = true,
                "false" => func.release_gil = false,
                _ => {}
            }
        }
        "doc" => func.doc = value.to_string(),
        _ => {}
    }
}

/// Parse the argument mini-grammar: comma-separated `name:zigType:pyType`
/// entries, trailing colon-segments defaulted when omitted.
fn parse_args(value: &str) -> Vec<ArgSpec> {
    value
        .split(',')
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return None;
            }
            let mut parts = entry.splitn(3, ':').map(str::trim);
            let name = parts.next().filter(|n| !n.is_empty())?;
            let zig_type = parts.next().filter(|t| !t.is_empty()).unwrap_or("i32");
            let py_type = parts.next().filter(|t| !t.is_empty()).unwrap_or("int");
            Some(ArgSpec {
                name: name.to_string(),
                zig_type: zig_type.to_string(),
                py_type: py_type.to_string(),
            })
        })
        .collect()
}

/// Parse a `["a", "b"]` style list, one quote layer stripped per item.
fn parse_string_list(value: &str) -> Vec<String> {
    let inner = value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');

    inner
        .split(',')
        .map(|item| unquote(item.trim()))
        .filter(|item| !item.is_empty())
        .collect()
}

/// Strip exactly one layer of matching single or double quotes.
fn unquote(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}
