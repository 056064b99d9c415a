//! Example: checking the styles of a rendered component

use anyhow::Context;
use modcss::{Config, ExpectedStyles, MatcherContext};

const PAGE: &str = r#"
<html>
  <head>
    <style data-css-module="button.module.css">
      .button { padding: 4px 8px; color: white; }
      .button.primary { background-color: #0055ff; }
      .toolbar > .button + .button { margin-left: 8px; }
    </style>
  </head>
  <body>
    <div class="toolbar">
      <button class="button">Cancel</button>
      <button class="button primary">Save</button>
    </div>
  </body>
</html>
"#;

fn main() -> anyhow::Result<()> {
    let config = Config::default();
    modcss::logging::init(config.log_filter.as_deref())?;

    println!("modcss v{}", modcss::VERSION);

    let document = modcss::html::parse(PAGE);
    let mut context = MatcherContext::new(config);
    let loaded = context.load_document(&document)?;
    tracing::info!(loaded, "Registered CSS modules");

    let save = context
        .find_element(&document, ".button.primary")?
        .context("no primary button in page")?;

    let expected = ExpectedStyles::new()
        .with("backgroundColor", "#0055ff")
        .with("marginLeft", "8px")
        .with("color", "black");
    let outcome = context.to_have_css_style(&document, save, &expected)?;

    println!("pass: {}", outcome.pass);
    println!("{}", outcome.message());
    Ok(())
}
