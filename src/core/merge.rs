//! Right-biased merge of an existing contract with a fresh one.

use crate::core::contract::ContractSpec;

/// Merge `left` (the contract as it exists in the file) with `right`
/// (freshly synthesized from the type).
///
/// All `right` methods come first, in their order; `left` methods whose
/// names `right` lacks follow in their original order. On a name clash
/// the `right` entry wins outright. Embedded elements, type parameters
/// and trailing comments only ever exist on `left` and are carried over.
pub fn merge(
    left: &ContractSpec,
    right: ContractSpec,
) -> ContractSpec
{
    let mut out = right;

    for (name, method) in left.methods()
    {
        if !out.contains(name)
        {
            out.insert(name, method.clone());
        }
    }

    if out
        .type_params
        .is_none()
    {
        out.type_params = left
            .type_params
            .clone();
    }

    out.alias = left.alias;

    let mut embeds = left
        .embeds
        .clone();
    embeds.append(&mut out.embeds);
    out.embeds = embeds;

    let mut dangling = left
        .dangling
        .clone();
    dangling.append(&mut out.dangling);
    out.dangling = dangling;

    out
}
