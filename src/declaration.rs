//! Declaration tree supplied by the host
//!
//! Declarations arrive already extracted from source (for example a
//! SourceKit-style structure dump) and serialized to YAML or JSON:
//!
//! ```yaml
//! file: Sources/App/Model.swift
//! declarations:
//!   - kind: class
//!     name: Model
//!     name_offset: 6
//!     substructure:
//!       - kind: var_instance
//!         name: myIncorectLet
//!         name_offset: 22
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Attribute marking a declaration that overrides a supertype member
pub const OVERRIDE_ATTRIBUTES: &[&str] = &["override", "source.decl.attribute.override"];

/// Error loading a declaration file
#[derive(Debug, Error)]
pub enum DeclarationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown declaration file format: {0}")]
    UnknownFormat(String),
}

/// Kind of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    VarGlobal,
    VarLocal,
    VarInstance,
    VarStatic,
    VarClass,
    VarParameter,
    FunctionFree,
    FunctionMethodInstance,
    FunctionMethodStatic,
    FunctionMethodClass,
    FunctionOperator,
    FunctionConstructor,
    FunctionSubscript,
    Class,
    Struct,
    Enum,
    Protocol,
    TypeAlias,
    EnumElement,
    Extension,
    #[serde(other)]
    Other,
}

impl DeclarationKind {
    /// Variable-like declarations (parameters excluded)
    pub fn is_variable(self) -> bool {
        matches!(
            self,
            DeclarationKind::VarGlobal
                | DeclarationKind::VarLocal
                | DeclarationKind::VarInstance
                | DeclarationKind::VarStatic
                | DeclarationKind::VarClass
        )
    }

    pub fn is_parameter(self) -> bool {
        self == DeclarationKind::VarParameter
    }

    /// Functions, methods, operators, initializers and subscripts
    pub fn is_function(self) -> bool {
        matches!(
            self,
            DeclarationKind::FunctionFree
                | DeclarationKind::FunctionMethodInstance
                | DeclarationKind::FunctionMethodStatic
                | DeclarationKind::FunctionMethodClass
                | DeclarationKind::FunctionOperator
                | DeclarationKind::FunctionConstructor
                | DeclarationKind::FunctionSubscript
        )
    }

    /// Nominal type declarations
    pub fn is_type(self) -> bool {
        matches!(
            self,
            DeclarationKind::Class
                | DeclarationKind::Struct
                | DeclarationKind::Enum
                | DeclarationKind::Protocol
                | DeclarationKind::TypeAlias
        )
    }

    /// Subject noun used in violation messages
    pub fn label(self) -> &'static str {
        match self {
            DeclarationKind::TypeAlias => "Type alias",
            DeclarationKind::Struct => "Struct",
            DeclarationKind::Enum => "Enum",
            kind if kind.is_type() => "Class",
            kind if kind.is_function() => "Function",
            _ => "Variable",
        }
    }
}

/// Declared access level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    Private,
    Fileprivate,
    #[default]
    Internal,
    Public,
    Open,
}

impl Accessibility {
    pub fn is_private(self) -> bool {
        matches!(self, Accessibility::Private | Accessibility::Fileprivate)
    }
}

/// A single declaration and its nested declarations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    /// Declaration kind
    pub kind: DeclarationKind,

    /// Declared name (functions include their parameter list, e.g. `isEven(number:)`)
    #[serde(default)]
    pub name: Option<String>,

    /// Local name of a parameter when it differs from its external label
    #[serde(default)]
    pub local_name: Option<String>,

    /// Byte offset of the local name
    #[serde(default)]
    pub local_name_offset: Option<usize>,

    /// Byte offset of the whole declaration
    #[serde(default)]
    pub offset: Option<usize>,

    /// Byte offset of the declared name
    #[serde(default)]
    pub name_offset: Option<usize>,

    /// Attributes attached to the declaration (e.g. `override`)
    #[serde(default)]
    pub attributes: Vec<String>,

    /// Access level
    #[serde(default)]
    pub accessibility: Accessibility,

    /// Nested declarations
    #[serde(default)]
    pub substructure: Vec<Declaration>,
}

impl Declaration {
    /// Create a declaration with a name at the given name offset
    pub fn new(kind: DeclarationKind, name: &str, name_offset: usize) -> Self {
        Self {
            kind,
            name: Some(name.to_string()),
            local_name: None,
            local_name_offset: None,
            offset: None,
            name_offset: Some(name_offset),
            attributes: Vec::new(),
            accessibility: Accessibility::default(),
            substructure: Vec::new(),
        }
    }

    /// Set the parameter local name and its offset
    pub fn with_local_name(mut self, local_name: &str, offset: usize) -> Self {
        self.local_name = Some(local_name.to_string());
        self.local_name_offset = Some(offset);
        self
    }

    /// Add an attribute
    pub fn with_attribute(mut self, attribute: &str) -> Self {
        self.attributes.push(attribute.to_string());
        self
    }

    /// Set the access level
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Add a nested declaration
    pub fn with_child(mut self, child: Declaration) -> Self {
        self.substructure.push(child);
        self
    }

    /// Check if the declaration overrides a supertype member
    pub fn is_override(&self) -> bool {
        self.attributes
            .iter()
            .any(|a| OVERRIDE_ATTRIBUTES.contains(&a.as_str()))
    }

    /// Offset of the name returned by [`Declaration::checkable_name`]
    ///
    /// Parameters checked by their local name anchor on `local_name_offset`
    /// when the host provides it.
    pub fn anchor_offset(&self) -> Option<usize> {
        let local = self
            .local_name
            .as_ref()
            .filter(|_| self.kind.is_parameter())
            .and(self.local_name_offset);
        local.or(self.name_offset).or(self.offset)
    }

    /// The name that is spelled, with its byte offset from the anchor
    ///
    /// Parameters use their local name. Private declarations drop one
    /// leading underscore; the returned offset accounts for it.
    pub fn checkable_name(&self) -> Option<(&str, usize)> {
        let name = if self.kind.is_parameter() {
            self.local_name.as_deref().or(self.name.as_deref())?
        } else {
            self.name.as_deref()?
        };

        if self.accessibility.is_private() {
            if let Some(stripped) = name.strip_prefix('_') {
                return Some((stripped, 1));
            }
        }

        Some((name, 0))
    }

    /// Iterate over this declaration and all nested declarations (depth-first)
    pub fn walk(&self) -> Box<dyn Iterator<Item = &Declaration> + '_> {
        Box::new(std::iter::once(self).chain(self.substructure.iter().flat_map(|d| d.walk())))
    }
}

/// A file of declarations produced by the host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeclarationFile {
    /// Source file the declarations were extracted from
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Top-level declarations
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

impl DeclarationFile {
    /// Load a declaration file (`.yaml`, `.yml` or `.json`)
    pub fn load(path: &Path) -> Result<Self, DeclarationError> {
        let content = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::parse(&content, ext)
    }

    /// Parse declaration file content for the given extension
    pub fn parse(content: &str, ext: &str) -> Result<Self, DeclarationError> {
        match ext {
            "yaml" | "yml" => Ok(serde_yaml::from_str(content)?),
            "json" => Ok(serde_json::from_str(content)?),
            _ => Err(DeclarationError::UnknownFormat(ext.to_string())),
        }
    }

    /// Iterate over every declaration in the file (depth-first)
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().flat_map(|d| d.walk())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(DeclarationKind::TypeAlias.label(), "Type alias");
        assert_eq!(DeclarationKind::Struct.label(), "Struct");
        assert_eq!(DeclarationKind::Enum.label(), "Enum");
        assert_eq!(DeclarationKind::Class.label(), "Class");
        assert_eq!(DeclarationKind::Protocol.label(), "Class");
        assert_eq!(DeclarationKind::FunctionOperator.label(), "Function");
        assert_eq!(DeclarationKind::VarParameter.label(), "Variable");
        assert_eq!(DeclarationKind::VarLocal.label(), "Variable");
    }

    #[test]
    fn test_unknown_kind_deserializes_as_other() {
        let decl: Declaration = serde_yaml::from_str("kind: precedence_group\nname: Foo\n").unwrap();
        assert_eq!(decl.kind, DeclarationKind::Other);
    }

    #[test]
    fn test_override_detection() {
        let decl = Declaration::new(DeclarationKind::VarInstance, "i", 0);
        assert!(!decl.is_override());
        assert!(decl.clone().with_attribute("override").is_override());
        assert!(decl
            .with_attribute("source.decl.attribute.override")
            .is_override());
    }

    #[test]
    fn test_checkable_name_parameter_uses_local_name() {
        let decl =
            Declaration::new(DeclarationKind::VarParameter, "_", 10).with_local_name("kind", 12);
        assert_eq!(decl.checkable_name(), Some(("kind", 0)));

        let decl = Declaration::new(DeclarationKind::VarParameter, "nuber", 10);
        assert_eq!(decl.checkable_name(), Some(("nuber", 0)));
    }

    #[test]
    fn test_parameter_anchors_on_local_name() {
        // func isEven(number nuber: Int)
        let decl = Declaration::new(DeclarationKind::VarParameter, "number", 12)
            .with_local_name("nuber", 19);
        assert_eq!(decl.anchor_offset(), Some(19));

        let mut label_only = decl.clone();
        label_only.local_name_offset = None;
        assert_eq!(label_only.anchor_offset(), Some(12));

        let mut variable = decl;
        variable.kind = DeclarationKind::VarLocal;
        assert_eq!(variable.anchor_offset(), Some(12));
    }

    #[test]
    fn test_checkable_name_strips_private_underscore() {
        let decl = Declaration::new(DeclarationKind::VarGlobal, "_myLet", 12)
            .with_accessibility(Accessibility::Private);
        assert_eq!(decl.checkable_name(), Some(("myLet", 1)));

        let public = Declaration::new(DeclarationKind::VarGlobal, "_myLet", 12);
        assert_eq!(public.checkable_name(), Some(("_myLet", 0)));
    }

    #[test]
    fn test_checkable_name_missing() {
        let mut decl = Declaration::new(DeclarationKind::VarGlobal, "x", 0);
        decl.name = None;
        assert_eq!(decl.checkable_name(), None);
    }

    #[test]
    fn test_walk_is_depth_first() {
        let file = DeclarationFile {
            file: None,
            declarations: vec![
                Declaration::new(DeclarationKind::Class, "A", 0)
                    .with_child(
                        Declaration::new(DeclarationKind::FunctionMethodInstance, "b()", 10)
                            .with_child(Declaration::new(DeclarationKind::VarLocal, "c", 20)),
                    )
                    .with_child(Declaration::new(DeclarationKind::VarInstance, "d", 30)),
                Declaration::new(DeclarationKind::VarGlobal, "e", 40),
            ],
        };

        let names: Vec<_> = file.iter().filter_map(|d| d.name.as_deref()).collect();
        assert_eq!(names, vec!["A", "b()", "c", "d", "e"]);
    }

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = r#"
file: Model.swift
declarations:
  - kind: var_global
    name: myLet
    name_offset: 4
    accessibility: private
    attributes: [override]
"#;
        let file = DeclarationFile::parse(yaml, "yaml").unwrap();
        assert_eq!(file.file, Some(PathBuf::from("Model.swift")));
        let decl = &file.declarations[0];
        assert_eq!(decl.kind, DeclarationKind::VarGlobal);
        assert_eq!(decl.name_offset, Some(4));
        assert_eq!(decl.accessibility, Accessibility::Private);
        assert!(decl.is_override());

        let json = r#"{"declarations":[{"kind":"struct","name":"Point","offset":0}]}"#;
        let file = DeclarationFile::parse(json, "json").unwrap();
        assert_eq!(file.declarations[0].kind, DeclarationKind::Struct);
        assert_eq!(file.declarations[0].anchor_offset(), Some(0));
    }

    #[test]
    fn test_parse_unknown_format() {
        let err = DeclarationFile::parse("", "swift").unwrap_err();
        assert_eq!(
            format!("{}", err),
            "Unknown declaration file format: swift"
        );
    }
}
