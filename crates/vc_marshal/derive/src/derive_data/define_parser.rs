use syn::{Generics, Ident, Path, PathSegment};
use syn::{Token, parenthesized, parse::ParseStream, token::Paren};

/// Format: `(in module_path as alias_name)`
fn parse_custom_path(input: ParseStream) -> syn::Result<(Option<Path>, Option<Ident>)> {
    if !input.peek(Paren) {
        return Ok((None, None));
    }

    let inner;
    parenthesized!(inner in input);
    inner.parse::<Token![in]>()?;
    if inner.peek(Token![::]) {
        return Err(inner.error("did not expect a leading double colon (`::`)"));
    }
    let path = Path::parse_mod_style(&inner)?;
    if path.segments.is_empty() {
        return Err(inner.error("expected a path"));
    }

    if !inner.peek(Token![as]) {
        return Ok((Some(path), None));
    }

    inner.parse::<Token![as]>()?;
    let name: Ident = inner.parse()?;
    Ok((Some(path), Some(name)))
}

/// The input of [`impl_type_path`](crate::impl_type_path).
pub(crate) struct ReflectTypePathParser {
    pub custom_path: Option<Path>,
    pub type_ident: Ident,
    pub type_path: Path,
    pub generics: Generics,
}

impl ReflectTypePathParser {
    /// Format: `(in module_path as alias_name) path<generics> where ...`
    pub fn parse(input: ParseStream) -> syn::Result<Self> {
        let (custom_path, custom_name) = parse_custom_path(input)?;

        let type_path = Path::parse_mod_style(input)?;

        let Some(last) = type_path.segments.last() else {
            return Err(input.error("expected a type path"));
        };
        let type_ident = last.ident.clone();

        let custom_path = custom_path.map(|mut path| {
            let name = custom_name.unwrap_or_else(|| type_ident.clone());
            path.segments.push(PathSegment::from(name));
            path
        });

        let mut generics = input.parse::<Generics>()?;
        generics.where_clause = input.parse()?;

        Ok(Self {
            custom_path,
            type_ident,
            type_path,
            generics,
        })
    }
}
