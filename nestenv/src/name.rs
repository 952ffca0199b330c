//! Name composition for decode nodes

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Case conversion applied to fully composed environment variable names.
///
/// The conversion always covers the whole name (prefix, separators and every
/// segment), never individual segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Case {
    /// Names are used as written
    #[default]
    None,
    /// Names are converted to upper case
    Upper,
    /// Names are converted to lower case
    Lower,
}

impl Case {
    /// Apply the conversion to `name`
    pub fn apply<'a>(self, name: &'a str) -> Cow<'a, str> {
        match self {
            Case::None => Cow::Borrowed(name),
            Case::Upper => Cow::Owned(name.to_uppercase()),
            Case::Lower => Cow::Owned(name.to_lowercase()),
        }
    }
}

impl FromStr for Case {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Case::None),
            "upper" => Ok(Case::Upper),
            "lower" => Ok(Case::Lower),
            _ => Err(format!("unknown case policy {s:?}, expected none, upper or lower")),
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Case::None => "none",
            Case::Upper => "upper",
            Case::Lower => "lower",
        })
    }
}

/// Compose the fully-qualified name of a node.
///
/// Ancestors are joined with `separator` in front of `name`, then `case` is
/// applied to the result as a whole.
pub fn resolve<S: AsRef<str>>(ancestors: &[S], name: &str, separator: &str, case: Case) -> String {
    let mut full = String::new();
    for ancestor in ancestors {
        full.push_str(ancestor.as_ref());
        full.push_str(separator);
    }
    full.push_str(name);
    case.apply(&full).into_owned()
}

/// Naming state of one decode frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Context {
    ancestors: Vec<String>,
    name: String,
    case: Case,
}

impl Context {
    pub(crate) fn root(name: &str, case: Case) -> Self {
        Context {
            ancestors: Vec::new(),
            name: name.to_owned(),
            case,
        }
    }

    /// Context of a record field. Record-shaped fields also become an ancestor
    /// of their own fields.
    pub(crate) fn field(&self, name: &str, nests: bool) -> Self {
        let mut ancestors = self.ancestors.clone();
        if nests {
            ancestors.push(name.to_owned());
            return Context {
                ancestors,
                name: String::new(),
                case: self.case,
            };
        }
        Context {
            ancestors,
            name: name.to_owned(),
            case: self.case,
        }
    }

    /// Context with an empty path, for values living directly in a narrowed view.
    pub(crate) fn rerooted(&self) -> Self {
        Context::root("", self.case)
    }

    /// Context for a key segment taken from the namespace itself. Such segments
    /// already are in their final form and are not case converted again.
    pub(crate) fn verbatim(segment: &str) -> Self {
        Context::root(segment, Case::None)
    }

    /// A record nested in a record is named by its own ancestor path
    pub(crate) fn resolve(&self, separator: &str) -> String {
        match self.ancestors.split_last() {
            Some((last, parents)) if self.name.is_empty() => resolve(parents, last, separator, self.case),
            _ => resolve(&self.ancestors, &self.name, separator, self.case),
        }
    }
}
