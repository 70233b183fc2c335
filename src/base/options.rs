//! Parser options

/// Switches for optional parts of the identifier syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserOptions {
    /// Allow a first segment to name an enumeration type (`Gender.MALE`)
    pub enum_class_access: bool,
    /// Allow `attribute@default` to reference an attribute's default value
    pub default_value_access: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            enum_class_access: true,
            default_value_access: true,
        }
    }
}

impl ParserOptions {
    /// Options accepting only parameters, attributes, associations,
    /// indices and qualifiers
    pub fn strict() -> Self {
        Self {
            enum_class_access: false,
            default_value_access: false,
        }
    }

    /// Set whether enumeration types may start an identifier
    pub fn with_enum_class_access(mut self, enabled: bool) -> Self {
        self.enum_class_access = enabled;
        self
    }

    /// Set whether `@default` is accepted
    pub fn with_default_value_access(mut self, enabled: bool) -> Self {
        self.default_value_access = enabled;
        self
    }
}
