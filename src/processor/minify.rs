//! Minification units for JS and CSS content.
//!
//! Uses oxc for JavaScript and lightningcss for CSS. Unlike a best-effort
//! minifier that falls back to the original source, these surface parse
//! failures through the pipeline failure channel — a broken asset should be
//! attributed, not silently bundled untouched.

use anyhow::{anyhow, bail};
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::TransformUnit;

/// Minify JavaScript with oxc (compress + mangle, comments stripped).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsMinify;

impl TransformUnit for JsMinify {
    fn name(&self) -> &str {
        "js-minify"
    }

    fn apply(&self, input: &str) -> anyhow::Result<String> {
        let allocator = Allocator::default();
        let source_type = SourceType::mjs();
        let ret = Parser::new(&allocator, input, source_type).parse();
        if !ret.errors.is_empty() {
            let messages = ret
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            bail!("js parse failed: {messages}");
        }
        let mut program = ret.program;
        let options = MinifierOptions {
            mangle: Some(MangleOptions::default()),
            compress: Some(CompressOptions::smallest()),
        };
        let ret = Minifier::new(options).minify(&allocator, &mut program);
        let code = Codegen::new()
            .with_options(CodegenOptions {
                minify: true,
                comments: CommentOptions::disabled(),
                ..CodegenOptions::default()
            })
            .with_scoping(ret.scoping)
            .build(&program)
            .code;
        Ok(code)
    }
}

/// Minify CSS with lightningcss.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssMinify;

impl TransformUnit for CssMinify {
    fn name(&self) -> &str {
        "css-minify"
    }

    fn apply(&self, input: &str) -> anyhow::Result<String> {
        let stylesheet = StyleSheet::parse(input, ParserOptions::default())
            .map_err(|e| anyhow!("css parse failed: {e}"))?;
        let result = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..PrinterOptions::default()
            })
            .map_err(|e| anyhow!("css print failed: {e}"))?;
        Ok(result.code)
    }
}
