//! Contract synthesis: methods → interface method signatures.

use tracing::debug;

use crate::core::contract::{ContractMethod, ContractSpec, Field, Signature};
use crate::core::document::Method;

/// Build a contract with one entry per method, in the order given.
///
/// Parameters are copied as declared (their names double as
/// documentation). Result names are dropped; a named group such as
/// `(a, b T)` becomes two unnamed `T` results so arity is kept.
pub fn synthesize(methods: &[Method]) -> ContractSpec
{
    let mut spec = ContractSpec::default();

    for method in methods
    {
        let signature = Signature {
            params: method
                .params
                .clone(),
            results: erase_result_names(&method.results),
        };

        if !spec.insert(
            method
                .name
                .clone(),
            ContractMethod::new(signature),
        )
        {
            debug!(method = %method.name, "duplicate method name, keeping the first declaration");
        }
    }

    spec
}

fn erase_result_names(results: &[Field]) -> Vec<Field>
{
    results
        .iter()
        .flat_map(|field| {
            let arity = field
                .names
                .len()
                .max(1);
            std::iter::repeat_n(Field::unnamed(field.ty.clone()), arity)
        })
        .collect()
}
