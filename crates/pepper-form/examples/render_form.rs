//! Example: validate submitted people and render them back into the form
//!
//! Run with `RUST_LOG=pepper_form=debug` to watch templates being expanded.

use anyhow::Context;
use pepper_form::{
    Form, FormConfig, Schema, SchemaRegistry, ValidationGateway, Validator,
};
use tracing_subscriber::EnvFilter;

const TEMPLATE: &str = include_str!("../tests/fixtures/form_structure_template.html");

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let person = Schema::structure()
        .member("name", Schema::string().with(Validator::Required))
        .member("age", Schema::integer().with(Validator::range(Some(0.0), Some(150.0))));
    let mut registry = SchemaRegistry::new();
    registry.register("myschema", Schema::structure().member("people", Schema::sequence(person)));

    // What a browser posts for two people, one of them too old
    let submitted = [
        ("schema", "myschema"),
        ("__start__", "sequence:people"),
        ("__start__", "mapping:people"),
        ("name", "zephania"),
        ("age", "24"),
        ("__end__:people", ""),
        ("__start__", "mapping:people"),
        ("name", "methusula"),
        ("age", "969"),
        ("__end__:people", ""),
        ("__end__:people", ""),
    ];

    let mut form = Form::from_fields(TEMPLATE, "myschema", submitted, FormConfig::default())
        .context("decoding submitted fields")?;
    form.validate(&ValidationGateway::new(&registry))?;

    println!("pepper form v{} (valid: {})", pepper_form::VERSION, form.is_valid());
    println!("{}", form.transform().context("rendering form")?);
    Ok(())
}
