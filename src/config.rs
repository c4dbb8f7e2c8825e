//! Encoder configuration.

/// How a class or map presents itself in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Indented `key: value` lines.
    Block,
    /// `{ key: value, ... }`.
    Flow,
}

/// How a list presents itself in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLayout {
    /// `- item` lines.
    Block,
    /// `[ item, item ]`.
    Flow,
    /// Flow when the element type is primitive, block otherwise. Without a
    /// descriptor, flow when every item is a scalar or null.
    Auto,
}

/// How strings are quoted in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringStyle {
    /// Plain where possible, double-quoted where the content requires it.
    Auto,
    /// Always double-quoted, with escape processing.
    DoubleQuoted,
    /// Always single-quoted, with `'` doubled.
    SingleQuoted,
}

/// Immutable encoder configuration.
///
/// A configuration is constructed once per codec instance and may be shared
/// freely, including across threads.
///
/// # Examples
///
/// ```
/// use yamlet::Config;
///
/// let doc = yamlet::from_str("a: 1\nb: 2")?;
/// let out = yamlet::to_string_with(&Config::flow(), &doc)?;
/// assert_eq!(out, "{ a: 1, b: 2 }\n");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Presentation of class values.
    pub class_layout: Layout,
    /// Presentation of map values.
    pub map_layout: Layout,
    /// Presentation of list values.
    pub list_layout: ListLayout,
    /// Quoting of string scalars.
    pub string_style: StringStyle,
    /// Literal emitted for `true`.
    pub true_literal: String,
    /// Literal emitted for `false`.
    pub false_literal: String,
    /// Literal emitted for null values, such as `null`, `~` or the empty
    /// string.
    pub null_literal: String,
    /// Whether class fields equal to their declared default are emitted.
    pub encode_default_values: bool,
    /// Spaces per indentation level. Constant across one encode.
    pub indent_width: usize,
}

impl Config {
    /// A JSON-like preset: everything flow, strings double-quoted.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlet::Config;
    ///
    /// let doc = yamlet::from_str("t:\n- 1\n- 2")?;
    /// let out = yamlet::to_string_with(&Config::flow(), &doc)?;
    /// assert_eq!(out, "{ t: [ 1, 2 ] }\n");
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn flow() -> Self {
        Self {
            class_layout: Layout::Flow,
            map_layout: Layout::Flow,
            list_layout: ListLayout::Flow,
            string_style: StringStyle::Auto,
            ..Self::default()
        }
    }
}

impl Default for Config {
    /// The block-preferred configuration: classes and maps in block form,
    /// lists chosen automatically.
    fn default() -> Self {
        Self {
            class_layout: Layout::Block,
            map_layout: Layout::Block,
            list_layout: ListLayout::Auto,
            string_style: StringStyle::Auto,
            true_literal: "true".to_string(),
            false_literal: "false".to_string(),
            null_literal: "null".to_string(),
            encode_default_values: true,
            indent_width: 2,
        }
    }
}
