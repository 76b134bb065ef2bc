//! HTML helpers: escaping and the document shell

/// Escape text for element content and double-quoted attributes
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 1100px; padding: 1rem 2rem; color: #262730; }
h1.title { text-align: center; margin-bottom: 0; }
h3.subtitle { text-align: center; font-weight: 300; margin-top: 0; }
.columns { display: flex; gap: 1rem; }
.columns > label { flex: 1; }
label { display: block; margin: .5rem 0; }
input[type=text], input[type=date], select { display: block; width: 100%; padding: .4rem; box-sizing: border-box; }
button { padding: .45rem 1rem; border: 1px solid #ccc; border-radius: .4rem; background: #fff; cursor: pointer; }
button.danger { background: #ff4b4b; border-color: #ff4b4b; color: #fff; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #e6e6e6; padding: .35rem .6rem; text-align: left; }
.flash { padding: .6rem 1rem; border-radius: .4rem; margin: .6rem 0; }
.flash-success { background: #dff5e3; }
.flash-info { background: #e1ecfb; }
.flash-warning { background: #fff6d6; }
.flash-error { background: #fde2e2; }
.tabs { display: flex; gap: 1rem; border-bottom: 1px solid #e6e6e6; margin: 1rem 0; }
.tabs a { padding: .4rem 0; text-decoration: none; color: inherit; }
.tabs a.active { border-bottom: 2px solid #ff4b4b; color: #ff4b4b; }
hr { margin-top: 2rem; border: none; border-top: 1px solid #e6e6e6; }
"#;

/// Wrap a rendered body in a full HTML document
pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}
