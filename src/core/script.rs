// src/core/script.rs
//
// The capacity page colours its status cells from inline jQuery, e.g.
//
//     $("#pool-lap").addClass("green");
//
// We never run the script. We search its text: first `#<id>`, then the first
// `addClass(` at or after that point, then the first double-quoted string
// after the call. First occurrence wins at every step.

const CLASS_CALL: &str = "addClass(";

/// Class name assigned to `#marker_id` in `script`, if any.
pub fn resolve_class<'a>(script: &'a str, marker_id: &str) -> Option<&'a str> {
    let selector = format!("#{marker_id}");
    let at = script.find(&selector)?;
    let call = script[at..].find(CLASS_CALL)? + at;
    let mut quoted = script[call..].split('"');
    quoted.next()?; // text up to the opening quote
    let class = quoted.next()?;
    // A lone quote with no closing partner is not an argument.
    quoted.next()?;
    Some(class)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r##"<script>
        jQuery(function($) {
            $("#pool-lap").addClass("green");
            $("#pool-leisure").removeClass("green");
            $("#pool-leisure").addClass("yellow");
            $("#pool-hot").addClass("red");
        });
    </script>"##;

    #[test]
    fn resolves_each_marker() {
        assert_eq!(resolve_class(SCRIPT, "pool-lap"), Some("green"));
        assert_eq!(resolve_class(SCRIPT, "pool-leisure"), Some("yellow"));
        assert_eq!(resolve_class(SCRIPT, "pool-hot"), Some("red"));
    }

    #[test]
    fn missing_marker_is_none() {
        assert_eq!(resolve_class(SCRIPT, "pool-dive"), None);
    }

    #[test]
    fn call_search_starts_at_marker() {
        // The earlier addClass belongs to another element.
        let s = r##"$("#a").addClass("red"); $("#b").show(); $("#c").addClass("green");"##;
        assert_eq!(resolve_class(s, "b"), Some("green"));
    }

    #[test]
    fn unterminated_argument_is_none() {
        assert_eq!(resolve_class(r##"$("#a").addClass("gre"##, "a"), None);
        assert_eq!(resolve_class(r##"$("#a").addClass(cls)"##, "a"), None);
    }

    #[test]
    fn same_input_same_answer() {
        let first = resolve_class(SCRIPT, "pool-leisure");
        for _ in 0..10 {
            assert_eq!(resolve_class(SCRIPT, "pool-leisure"), first);
        }
    }
}
