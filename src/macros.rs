// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression — works for literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Compile a CSS selector once and hand out a `&'static Selector`.
/// Only for literals: a literal that fails to parse is a programming error.
#[macro_export]
macro_rules! sel {
    ($css:literal) => {{
        static SEL: ::std::sync::LazyLock<::scraper::Selector> =
            ::std::sync::LazyLock::new(|| {
                ::scraper::Selector::parse($css).expect(concat!("bad selector: ", $css))
            });
        &*SEL
    }};
}
