use std::sync::OnceLock;

use regex::Regex;
use scraper::Selector;

/// A selector or pattern written as a literal, compiled on first use and shared afterwards.
#[derive(Debug)]
pub struct Compiled<T> {
    cell: OnceLock<T>,
    source: &'static str,
    compile: fn(&'static str) -> Result<T, String>,
}

impl<T> Compiled<T> {
    pub const fn new(source: &'static str, compile: fn(&'static str) -> Result<T, String>) -> Self {
        Self {
            cell: OnceLock::new(),
            source,
            compile,
        }
    }
}

impl<T> core::ops::Deref for Compiled<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.cell.get_or_init(|| match (self.compile)(self.source) {
            Ok(compiled) => compiled,
            Err(e) => panic!("Error compiling static pattern {}: {e}", self.source),
        })
    }
}

pub fn selector(source: &'static str) -> Result<Selector, String> {
    Selector::parse(source).map_err(|e| format!("{e:?}"))
}

pub fn regex(source: &'static str) -> Result<Regex, String> {
    Regex::new(source).map_err(|e| e.to_string())
}

#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: $crate::parse::compiled::Compiled<::scraper::Selector> =
            $crate::parse::compiled::Compiled::new($sel, $crate::parse::compiled::selector);
    };
}

#[macro_export]
macro_rules! static_regex {
    ($x: ident <- $re: literal) => {
        static $x: $crate::parse::compiled::Compiled<::regex::Regex> =
            $crate::parse::compiled::Compiled::new($re, $crate::parse::compiled::regex);
    };
}
