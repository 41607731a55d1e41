use lightningcss::{
    bundler::{Bundler, FileProvider},
    stylesheet::{MinifyOptions, ParserOptions, PrinterOptions},
};
use std::fs;
use std::path::Path;

const CSS_ENTRY: &str = "assets/css/main.css";
const CSS_BUNDLE: &str = "assets/dist/bundle.css";

/// Inline every `@import` under the entry file and minify the result
fn bundle_css(entry: &Path) -> Result<String, String> {
    let fs_provider = FileProvider::new();
    let mut bundler = Bundler::new(&fs_provider, None, ParserOptions::default());

    let mut stylesheet = bundler.bundle(entry).map_err(|e| e.to_string())?;
    stylesheet
        .minify(MinifyOptions::default())
        .map_err(|e| e.to_string())?;

    let css = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| e.to_string())?;

    Ok(css.code)
}

fn main() {
    println!("cargo:rerun-if-changed=assets/css/");

    fs::create_dir_all("assets/dist").expect("Failed to create assets/dist directory");

    let css = bundle_css(Path::new(CSS_ENTRY))
        .unwrap_or_else(|e| panic!("Failed to bundle {}: {}", CSS_ENTRY, e));

    fs::write(CSS_BUNDLE, css).expect("Failed to write bundle.css");
}
