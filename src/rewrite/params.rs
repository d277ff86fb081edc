//! Parameter fragments parsed into structural `name: Type` pairs.

use quote::ToTokens;
use serde::Serialize;
use syn::{FnArg, Pat};

/// One `name: Type` declaration from a rule header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Declaration as written, whitespace collapsed; this is what gets emitted
    pub text: String,
    /// Binding name, without `mut` or `ref`
    pub name: String,
    /// Type rendered from its token stream
    #[serde(rename = "type")]
    pub ty: String,
}

impl Parameter {
    /// `e: Env` is pulled out of classification and always emitted first.
    pub fn is_env(&self) -> bool {
        self.name == ENV_NAME && self.ty.replace(' ', "") == ENV_TYPE
    }

    /// `false` for env parameters written with `mut`, `ref` or a subpattern,
    /// which the rewrite replaces with the plain form.
    pub fn is_plain_env(&self) -> bool {
        self.is_env() && self.text.replace(' ', "") == format!("{}:{}", ENV_NAME, ENV_TYPE)
    }
}

pub const ENV_NAME: &str = "e";
pub const ENV_TYPE: &str = "Env";

/// Text of the parameter that always leads a rewritten list.
pub fn env_parameter_text() -> String {
    format!("{}: {}", ENV_NAME, ENV_TYPE)
}

/// Parse one fragment produced by the scanner.
pub fn parse_parameter(fragment: &str) -> Result<Parameter, String> {
    let arg: FnArg = syn::parse_str(fragment)
        .map_err(|e| format!("`{}` is not a `name: Type` parameter: {}", fragment, e))?;

    let typed = match arg {
        FnArg::Typed(typed) => typed,
        FnArg::Receiver(_) => {
            return Err(format!("`{}`: receivers are not allowed in rule headers", fragment))
        }
    };

    let name = match typed.pat.as_ref() {
        Pat::Ident(ident) => ident.ident.to_string(),
        other => other.to_token_stream().to_string(),
    };

    Ok(Parameter {
        text: fragment.to_string(),
        name,
        ty: typed.ty.to_token_stream().to_string(),
    })
}

/// Parse every fragment, stopping at the first malformed one.
pub fn parse_parameters(fragments: &[String]) -> Result<Vec<Parameter>, String> {
    fragments.iter().map(|f| parse_parameter(f)).collect()
}
