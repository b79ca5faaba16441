use console::style;

/// Defines different styles for text elements.
pub enum StyleType {
    Code,
    Error,
}

/// Applies a consistent style to a string written to stderr.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Code => style(text).for_stderr().cyan().bold(),
        StyleType::Error => style(text).for_stderr().red(),
    };
    styled.to_string()
}
