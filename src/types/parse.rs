use super::{DataType, ScalarKind};

/// Errors produced while parsing the textual type form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeParseError {
    /// Input was empty or only whitespace
    #[error("Empty type expression")]
    Empty,

    /// A character that cannot start or continue a type expression
    #[error("Unexpected character '{found}' at offset {offset} in '{input}'")]
    UnexpectedChar {
        /// Whole input text
        input: String,
        /// Offending character
        found: char,
        /// Byte offset of the character
        offset: usize,
    },

    /// The input ended in the middle of a type expression
    #[error("Unexpected end of type expression '{0}'")]
    UnexpectedEnd(String),

    /// A generic wrapper was given the wrong number of type arguments
    #[error("'{name}' takes {expected} type argument(s), found {found}")]
    Arity {
        /// Generic type name
        name: String,
        /// Number of arguments the type takes
        expected: usize,
        /// Number of arguments supplied
        found: usize,
    },

    /// Scalar keywords cannot be parameterized
    #[error("Type '{0}' does not take type arguments")]
    NotGeneric(String),

    /// A record or enumeration name that is not an identifier, or that is
    /// spelled like a built-in type
    #[error("'{0}' cannot be used as a type name")]
    ReservedName(String),
}

/// Names the parser reads as built-in types rather than record names
const GENERIC_NAMES: [&str; 5] = ["Optional", "Link", "List", "Map", "Enum"];

/// Checks that `name` reads back as the same record (or, with
/// `allow_keywords`, enumeration) name in the text form.
pub(crate) fn check_type_name(name: &str, allow_keywords: bool) -> Result<(), TypeParseError> {
    let reserved = || TypeParseError::ReservedName(name.to_string());
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return Err(reserved()),
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '.') {
        return Err(reserved());
    }
    if !allow_keywords && (ScalarKind::from_keyword(name).is_some() || GENERIC_NAMES.contains(&name)) {
        return Err(reserved());
    }
    Ok(())
}

/// Parses `text` into a [`DataType`].
pub(crate) fn parse_data_type(text: &str) -> Result<DataType, TypeParseError> {
    if text.trim().is_empty() {
        return Err(TypeParseError::Empty);
    }
    let mut parser = Parser {
        input: text,
        pos: 0,
    };
    let parsed = parser.parse_type()?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(parsed),
        Some(c) => Err(parser.unexpected(c)),
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn unexpected(&self, found: char) -> TypeParseError {
        TypeParseError::UnexpectedChar {
            input: self.input.to_string(),
            found,
            offset: self.pos,
        }
    }

    fn ident(&mut self) -> Result<&'a str, TypeParseError> {
        self.skip_whitespace();
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_alphabetic() || c == '_' => {}
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(TypeParseError::UnexpectedEnd(self.input.to_string())),
        }
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_' || c == '.') {
                break;
            }
            self.pos += c.len_utf8();
        }
        Ok(&self.input[start..self.pos])
    }

    fn expect(&mut self, expected: char) -> Result<(), TypeParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(self.unexpected(c)),
            None => Err(TypeParseError::UnexpectedEnd(self.input.to_string())),
        }
    }

    fn parse_type(&mut self) -> Result<DataType, TypeParseError> {
        let name = self.ident()?;
        self.skip_whitespace();
        if self.peek() != Some('<') {
            if let Some(kind) = ScalarKind::from_keyword(name) {
                return Ok(DataType::Scalar(kind));
            }
            return match name {
                _ if GENERIC_NAMES.contains(&name) => Err(TypeParseError::Arity {
                    name: name.to_string(),
                    expected: if name == "Map" { 2 } else { 1 },
                    found: 0,
                }),
                _ => Ok(DataType::record(name)),
            };
        }
        if ScalarKind::from_keyword(name).is_some() {
            return Err(TypeParseError::NotGeneric(name.to_string()));
        }

        self.expect('<')?;
        if name == "Enum" {
            let enum_name = self.ident()?;
            self.expect('>')?;
            return Ok(DataType::enumeration(enum_name));
        }

        let mut args = vec![self.parse_type()?];
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                    args.push(self.parse_type()?);
                }
                Some('>') => {
                    self.pos += 1;
                    break;
                }
                Some(c) => return Err(self.unexpected(c)),
                None => return Err(TypeParseError::UnexpectedEnd(self.input.to_string())),
            }
        }

        let found = args.len();
        let arity = |expected: usize| TypeParseError::Arity {
            name: name.to_string(),
            expected,
            found,
        };
        match name {
            "Optional" | "Link" | "List" => {
                if args.len() != 1 {
                    return Err(arity(1));
                }
                let inner = args.remove(0);
                Ok(match name {
                    "Optional" => DataType::optional(inner),
                    "Link" => DataType::link(inner),
                    _ => DataType::list(inner),
                })
            }
            "Map" => {
                if args.len() != 2 {
                    return Err(arity(2));
                }
                let value = args.remove(1);
                let key = args.remove(0);
                Ok(DataType::map(key, value))
            }
            // Registered records are not generic
            _ => Err(TypeParseError::NotGeneric(name.to_string())),
        }
    }
}
