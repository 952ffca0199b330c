//! Entry points of a decode: settings, prefix filtering and the root frame

use log::debug;

use crate::de::Engine;
use crate::error::DecodeError;
use crate::name::{Case, Context};
use crate::namespace::Namespace;
use crate::shape::Decode;

/// Default nesting limit of a single decode
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Settings for decoding values from environment variables.
///
/// ```rust
/// use nestenv::{Case, Decoder, Namespace};
///
/// let env = Namespace::from_iter([("ACME_PORTS_0", "80"), ("ACME_PORTS_1", "443")]);
/// let mut ports: Vec<u16> = Vec::new();
/// Decoder::new()
///     .prefix("acme")
///     .case(Case::Upper)
///     .decode_named_from(&env, "ports", &mut ports)?;
/// assert_eq!(ports, [80, 443]);
/// # Ok::<(), nestenv::DecodeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoder {
    prefix: String,
    separator: String,
    case: Case,
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder {
            prefix: String::new(),
            separator: "_".to_string(),
            case: Case::None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Decoder {
    /// Decoder without prefix, separated by `_`, without case conversion
    pub fn new() -> Self {
        Self::default()
    }

    /// Only consider variables starting with `prefix` followed by the separator
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Separator between name segments
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Case conversion applied to composed names
    pub fn case(mut self, case: Case) -> Self {
        self.case = case;
        self
    }

    /// Maximum nesting depth before decoding fails with
    /// [`DecodeError::DepthExceeded`]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Restrict `env` to the variables below the configured prefix, with the
    /// prefix and separator stripped. Without a prefix `env` is returned as is.
    pub fn scope(&self, env: &Namespace) -> Namespace {
        if self.prefix.is_empty() {
            return env.clone();
        }
        let prefix = format!("{}{}", self.prefix, self.separator);
        env.narrow(&self.case.apply(&prefix))
    }

    /// Snapshot of the process environment below the configured prefix
    pub fn namespace(&self) -> Namespace {
        self.scope(&Namespace::from_env())
    }

    /// Decode `target` from the process environment, field names forming the
    /// top level of the variable names
    pub fn decode<T: Decode + ?Sized>(&self, target: &mut T) -> Result<(), DecodeError> {
        self.run(&Namespace::from_env(), None, target)
    }

    /// Decode `target` from the process environment as the value called `name`.
    ///
    /// Sequences, mappings, pointers and scalars are looked up below
    /// `prefix + separator + name`. A record is not named itself: its fields
    /// are rooted directly at the prefix, so `name` has no effect on it.
    pub fn decode_named<T: Decode + ?Sized>(&self, name: &str, target: &mut T) -> Result<(), DecodeError> {
        self.run(&Namespace::from_env(), Some(name), target)
    }

    /// Like [`Decoder::decode`], reading from `env` instead of the process
    /// environment
    pub fn decode_from<T: Decode + ?Sized>(&self, env: &Namespace, target: &mut T) -> Result<(), DecodeError> {
        self.run(env, None, target)
    }

    /// Like [`Decoder::decode_named`], reading from `env` instead of the process
    /// environment. Records ignore `name` here as well.
    pub fn decode_named_from<T: Decode + ?Sized>(
        &self,
        env: &Namespace,
        name: &str,
        target: &mut T,
    ) -> Result<(), DecodeError> {
        self.run(env, Some(name), target)
    }

    fn run<T: Decode + ?Sized>(&self, env: &Namespace, name: Option<&str>, target: &mut T) -> Result<(), DecodeError> {
        if self.separator.is_empty() {
            return Err(DecodeError::EmptySeparator);
        }

        let target = target.target();
        if name.is_none() && target.shape().is_scalar() {
            return Err(DecodeError::InvalidTarget {
                shape: target.shape().to_string(),
            });
        }

        let ns = self.scope(env);
        debug!(
            "Decoding {} from {} variables below {:?}",
            target.shape(),
            ns.len(),
            ns.origin()
        );

        let engine = Engine::new(self.case.apply(&self.separator).into_owned(), self.max_depth);
        engine.decode(&Context::root(name.unwrap_or_default(), self.case), target, &ns, 0)
    }
}

/// Decode `target` from the process environment.
///
/// Variables are looked up as `prefix + sep + path`, where the path is built
/// from field names, sequence indices and map keys joined by `sep`, with `case`
/// applied to the whole name. An empty prefix uses the whole environment.
pub fn decode<T: Decode + ?Sized>(target: &mut T, prefix: &str, sep: &str, case: Case) -> Result<(), DecodeError> {
    Decoder::new()
        .prefix(prefix)
        .separator(sep)
        .case(case)
        .decode(target)
}

/// Decode `target` from the process environment as the single value called
/// `name`.
///
/// Records ignore `name` and take their fields from directly below `prefix`;
/// see [`Decoder::decode_named`].
pub fn decode_named<T: Decode + ?Sized>(
    target: &mut T,
    prefix: &str,
    sep: &str,
    name: &str,
    case: Case,
) -> Result<(), DecodeError> {
    Decoder::new()
        .prefix(prefix)
        .separator(sep)
        .case(case)
        .decode_named(name, target)
}

/// Types that know where in the environment they are configured.
///
/// `#[derive(Decode)]` implements this trait, taking the constants from the
/// struct-level `#[env(prefix = "..", separator = "..", case = "..")]`
/// attribute.
pub trait FromEnv: Decode {
    /// Prefix of all variables of this type
    const PREFIX: &'static str = "";
    /// Separator between name segments
    const SEPARATOR: &'static str = "_";
    /// Case conversion applied to composed names
    const CASE: Case = Case::None;

    /// Decoder configured from the type's constants
    fn decoder() -> Decoder {
        Decoder::new()
            .prefix(Self::PREFIX)
            .separator(Self::SEPARATOR)
            .case(Self::CASE)
    }

    /// Build a value of this type from the process environment.
    ///
    /// Decoding starts from [`Decode::placeholder`], so the type does not need
    /// to implement `Default`.
    ///
    /// # Errors
    ///
    /// - Required environment variables are not set
    /// - Environment variable values cannot be parsed into target types
    fn from_env() -> Result<Self, DecodeError>
    where
        Self: Sized,
    {
        Self::from_namespace(&Namespace::from_env())
    }

    /// Like [`FromEnv::from_env`], reading from `env`
    fn from_namespace(env: &Namespace) -> Result<Self, DecodeError>
    where
        Self: Sized,
    {
        let mut value = Self::placeholder();
        Self::decoder().decode_from(env, &mut value)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;
    use std::env;

    #[test]
    fn test_prefix_is_case_converted() {
        let env = Namespace::from_iter([("ACME_BOOL", "true")]);
        let mut value = false;
        Decoder::new()
            .prefix("acme")
            .case(Case::Upper)
            .decode_named_from(&env, "bool", &mut value)
            .unwrap();
        assert!(value);
    }

    #[test]
    fn test_lower_case_policy() {
        let env = Namespace::from_iter([("acme_bool", "true")]);
        let mut value = false;
        Decoder::new()
            .prefix("ACME")
            .case(Case::Lower)
            .decode_named_from(&env, "BOOL", &mut value)
            .unwrap();
        assert!(value);
    }

    #[test]
    fn test_without_prefix_uses_everything() {
        let env = Namespace::from_iter([("BOOL", "true"), ("ACME_BOOL", "false")]);
        let mut value = false;
        Decoder::new().decode_named_from(&env, "BOOL", &mut value).unwrap();
        assert!(value);
    }

    #[test]
    fn test_errors_carry_the_prefix() {
        let env = Namespace::from_iter([("ACME_MAP_A", "x")]);
        let mut map: HashMap<String, i32> = HashMap::new();
        let err = Decoder::new()
            .prefix("ACME")
            .decode_named_from(&env, "MAP", &mut map)
            .unwrap_err();
        assert!(matches!(err, DecodeError::MalformedValue { name, .. } if name == "ACME_MAP_A"));
    }

    #[test]
    fn test_custom_separator() {
        let env = Namespace::from_iter([("APP__LIST__0", "a_b"), ("APP__LIST__1", "c")]);
        let mut list: Vec<String> = Vec::new();
        Decoder::new()
            .prefix("APP")
            .separator("__")
            .decode_named_from(&env, "LIST", &mut list)
            .unwrap();
        assert_eq!(list, ["a_b", "c"]);
    }

    #[test]
    fn test_unnamed_scalar_is_invalid_target() {
        let mut value = 0u32;
        let err = Decoder::new()
            .decode_from(&Namespace::new(), &mut value)
            .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTarget { shape } if shape == "u32"));
    }

    #[test]
    fn test_unnamed_sequence_indexes_below_prefix() {
        let env = Namespace::from_iter([("ACME_0", "x"), ("ACME_1", "y")]);
        let mut list: Vec<String> = Vec::new();
        Decoder::new().prefix("ACME").decode_from(&env, &mut list).unwrap();
        assert_eq!(list, ["x", "y"]);
    }

    #[derive(Debug, Default, PartialEq)]
    struct Wrap {
        a: u8,
    }

    impl Decode for Wrap {
        fn shape() -> crate::Shape {
            crate::Shape::Record { name: "Wrap" }
        }

        fn placeholder() -> Self {
            Self::default()
        }

        fn target(&mut self) -> crate::Target<'_> {
            crate::Target::Record(self)
        }
    }

    impl crate::RecordTarget for Wrap {
        fn type_name(&self) -> &'static str {
            "Wrap"
        }

        fn fields(&self) -> &'static [&'static str] {
            &["A"]
        }

        fn field(&mut self, index: usize) -> Option<crate::Target<'_>> {
            match index {
                0 => Some(self.a.target()),
                _ => None,
            }
        }
    }

    #[test]
    fn test_named_record_fields_stay_at_prefix() {
        let env = Namespace::from_iter([("CFG_A", "1"), ("CFG_NAME_A", "2")]);
        let mut value = Wrap::default();
        Decoder::new()
            .prefix("CFG")
            .decode_named_from(&env, "NAME", &mut value)
            .unwrap();
        assert_eq!(value, Wrap { a: 1 });

        let err = Decoder::new()
            .decode_named_from(&env, "CFG", &mut value)
            .unwrap_err();
        assert!(matches!(err, DecodeError::MissingKey { name } if name == "A"));
    }

    #[test]
    fn test_empty_separator() {
        let mut value = false;
        let err = Decoder::new()
            .separator("")
            .decode_named_from(&Namespace::new(), "B", &mut value)
            .unwrap_err();
        assert!(matches!(err, DecodeError::EmptySeparator));
    }

    #[test]
    fn test_max_depth() {
        let env = Namespace::from_iter([("M_0_0", "1")]);
        let mut matrix: Vec<Vec<i32>> = Vec::new();
        let err = Decoder::new()
            .max_depth(1)
            .decode_named_from(&env, "M", &mut matrix)
            .unwrap_err();
        assert!(matches!(err, DecodeError::DepthExceeded { limit: 1, .. }));
    }

    #[test]
    #[serial]
    fn test_decode_named_reads_process_environment() {
        env::set_var("NESTENV_DECODER_SLICE_0", "11");
        env::set_var("NESTENV_DECODER_SLICE_1", "-22");
        env::set_var("NESTENV_DECODER_SLICE_2", "33");

        let mut values: Vec<i32> = Vec::new();
        let result = decode_named(&mut values, "NESTENV_DECODER", "_", "SLICE", Case::None);

        env::remove_var("NESTENV_DECODER_SLICE_0");
        env::remove_var("NESTENV_DECODER_SLICE_1");
        env::remove_var("NESTENV_DECODER_SLICE_2");

        result.unwrap();
        assert_eq!(values, [11, -22, 33]);
    }

    #[test]
    #[serial]
    fn test_string_values_expand_at_decode_time() {
        env::set_var("NESTENV_DECODER_HOME", "/home/gopher");
        let env = Namespace::from_iter([("DIR", "${NESTENV_DECODER_HOME}/bin")]);
        let mut dir = String::new();
        let result = Decoder::new().decode_named_from(&env, "DIR", &mut dir);
        env::remove_var("NESTENV_DECODER_HOME");

        result.unwrap();
        assert_eq!(dir, "/home/gopher/bin");
    }
}
