//! Helper functions available to every compiled template.
//!
//! Each helper is registered both as a function (`split(s, ",")`) and, where
//! it takes the value first, as a filter (`s | split(",")`).

use minijinja::Environment;

fn split(s: String, sep: String) -> Vec<String> {
    s.split(sep.as_str()).map(str::to_string).collect()
}

fn trim(s: String) -> String {
    s.trim().to_string()
}

fn contains(s: String, sub: String) -> bool {
    s.contains(sub.as_str())
}

fn has_prefix(s: String, prefix: String) -> bool {
    s.starts_with(prefix.as_str())
}

fn has_suffix(s: String, suffix: String) -> bool {
    s.ends_with(suffix.as_str())
}

fn to_lower(s: String) -> String {
    s.to_lowercase()
}

fn to_upper(s: String) -> String {
    s.to_uppercase()
}

/// Proxy-config spelling of a flag.
fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// Install the helper set into `env`.
pub fn register(env: &mut Environment<'static>) {
    env.add_function("split", split);
    env.add_function("trim", trim);
    env.add_function("contains", contains);
    env.add_function("has_prefix", has_prefix);
    env.add_function("has_suffix", has_suffix);
    env.add_function("to_lower", to_lower);
    env.add_function("to_upper", to_upper);
    env.add_function("on_off", on_off);

    env.add_filter("split", split);
    env.add_filter("to_lower", to_lower);
    env.add_filter("to_upper", to_upper);
    env.add_filter("on_off", on_off);
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    fn render(source: &str) -> String {
        let mut env = Environment::new();
        register(&mut env);
        env.render_str(source, context! { name => " Cafe.Example.COM ", tls => true })
            .unwrap()
    }

    #[test]
    fn test_string_helpers() {
        assert_eq!(render("{{ to_lower(trim(name)) }}"), "cafe.example.com");
        assert_eq!(render("{{ name | trim | to_upper }}"), "CAFE.EXAMPLE.COM");
        assert_eq!(render("{% if has_prefix(trim(name), 'Cafe') %}yes{% endif %}"), "yes");
        assert_eq!(render("{% if has_suffix(name, 'COM') %}yes{% else %}no{% endif %}"), "no");
        assert_eq!(render("{% if contains(name, 'Example') %}yes{% endif %}"), "yes");
    }

    #[test]
    fn test_split() {
        assert_eq!(
            render("{% for p in split('80,443', ',') %}listen {{ p }};{% endfor %}"),
            "listen 80;listen 443;"
        );
    }

    #[test]
    fn test_on_off() {
        assert_eq!(render("ssl {{ on_off(tls) }};"), "ssl on;");
        assert_eq!(render("ssl {{ false | on_off }};"), "ssl off;");
    }
}
