//! Type string parsing.
//!
//! Object types arrive as strings in whatever address form the data source
//! prefers. Parsing them into a `TypeTag` and printing them back canonically
//! lets `0x2::sui::SUI` and its 64-hex spelling compare equal.

use move_core_types::account_address::AccountAddress;
use move_core_types::identifier::Identifier;
use move_core_types::language_storage::{StructTag, TypeTag};

use crate::framework::{COIN_MODULE, COIN_STRUCT, SUI_FRAMEWORK};

/// Parse a Move type string such as `u64`, `vector<u8>` or
/// `0x2::coin::Coin<0x2::sui::SUI>` into a [`TypeTag`].
///
/// Addresses may be short or full length. Returns None for anything that is
/// not a well-formed type.
///
/// ```ignore
/// use sui_analyzer_types::parse_type_tag;
///
/// let tag = parse_type_tag("0x2::coin::Coin<0x2::sui::SUI>").unwrap();
/// ```
pub fn parse_type_tag(type_str: &str) -> Option<TypeTag> {
    let type_str = type_str.trim();
    if let Some(primitive) = primitive_tag(type_str) {
        return Some(primitive);
    }

    let (head, generics) = split_generics(type_str)?;
    if head == "vector" {
        let [element] = <[TypeTag; 1]>::try_from(generics?).ok()?;
        return Some(TypeTag::Vector(Box::new(element)));
    }

    let mut path = head.split("::");
    let (address, module, name) = (path.next()?, path.next()?, path.next()?);
    if path.next().is_some() {
        return None;
    }
    Some(TypeTag::Struct(Box::new(StructTag {
        address: AccountAddress::from_hex_literal(address).ok()?,
        module: Identifier::new(module).ok()?,
        name: Identifier::new(name).ok()?,
        type_params: generics.unwrap_or_default(),
    })))
}

fn primitive_tag(type_str: &str) -> Option<TypeTag> {
    Some(match type_str {
        "bool" => TypeTag::Bool,
        "u8" => TypeTag::U8,
        "u16" => TypeTag::U16,
        "u32" => TypeTag::U32,
        "u64" => TypeTag::U64,
        "u128" => TypeTag::U128,
        "u256" => TypeTag::U256,
        "address" => TypeTag::Address,
        "signer" => TypeTag::Signer,
        _ => return None,
    })
}

/// Split `Head<A, B<C>>` into `Head` and its parsed arguments. The outer
/// None means a malformed argument list; `Some((head, None))` means no list.
fn split_generics(type_str: &str) -> Option<(&str, Option<Vec<TypeTag>>)> {
    let Some(open) = type_str.find('<') else {
        return Some((type_str, None));
    };
    let body = type_str[open + 1..].strip_suffix('>')?;
    let mut arguments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (at, c) in body.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                arguments.push(parse_type_tag(&body[start..at])?);
                start = at + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    let last = body[start..].trim();
    if !last.is_empty() {
        arguments.push(parse_type_tag(last)?);
    }
    Some((type_str[..open].trim(), Some(arguments)))
}

/// Canonical spelling of a type string, with full-length addresses.
///
/// Returns None when the string does not parse.
pub fn normalize_type_string(type_str: &str) -> Option<String> {
    parse_type_tag(type_str).map(|tag| tag.to_canonical_string(true))
}

/// If `type_str` is `0x2::coin::Coin<T>`, the canonical spelling of `T`.
///
/// Anything else, including a `Coin` with the wrong number of type
/// parameters or from another package, yields None.
pub fn coin_type_argument(type_str: &str) -> Option<String> {
    let TypeTag::Struct(tag) = parse_type_tag(type_str)? else {
        return None;
    };
    if tag.address != SUI_FRAMEWORK
        || tag.module.as_str() != COIN_MODULE
        || tag.name.as_str() != COIN_STRUCT
        || tag.type_params.len() != 1
    {
        return None;
    }
    Some(tag.type_params[0].to_canonical_string(true))
}
