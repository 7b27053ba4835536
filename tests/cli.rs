//! Command line behaviour against a mock backend.

use std::sync::Arc;

use clap::Parser;
use serde_json::{Value, json};
use testresult::TestResult;

use matcha::{
    cli::{Cli, CliError, run_command},
    pricing::money,
    prelude::*,
};

fn menu() -> Vec<RawProduct> {
    [
        json!({
            "id_producto": 1,
            "nombre": "Matcha Latte",
            "precio": "50.00",
            "categoria": "Bebidas Frías",
            "lleva_leche": 1
        }),
        json!({
            "id_producto": 2,
            "nombre": "Chapata",
            "precio": 30,
            "categoria": "Menú Salado",
            "lleva_extras": true
        }),
        json!({
            "id_producto": 3,
            "nombre": "Pastel del día",
            "precio": "0",
            "categoria": "Postres"
        }),
    ]
    .into_iter()
    .map(RawProduct::from_value)
    .collect()
}

fn context(mut api: MockMenuApi) -> AppContext {
    api.expect_list_products().returning(|| Ok(menu()));

    AppContext::with_api(
        Arc::new(api),
        "http://localhost:8000/api",
        SurchargeRates::default(),
    )
}

async fn run(api: MockMenuApi, args: &[&str]) -> Result<String, CliError> {
    let cli = Cli::try_parse_from(std::iter::once("matcha").chain(args.iter().copied()))
        .map_err(|error| CliError::Io(std::io::Error::other(error.to_string())))?;

    let mut context = context(api);
    let mut out = Vec::new();

    run_command(&mut context, cli.command, &mut out).await?;

    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[tokio::test]
async fn menu_prints_one_section_per_category() -> TestResult {
    let output = run(MockMenuApi::new(), &["menu"]).await?;

    assert!(output.contains("Bebidas Frías"));
    assert!(output.contains("Menú Salado"));
    assert!(output.contains("Matcha Latte"));
    assert!(output.contains("$50.00"));
    assert!(output.contains("Consultar precio"));

    Ok(())
}

#[tokio::test]
async fn menu_can_be_filtered_to_one_section() -> TestResult {
    let output = run(MockMenuApi::new(), &["menu", "--category", "menu-salado"]).await?;

    assert!(output.contains("Chapata"));
    assert!(!output.contains("Matcha Latte"));

    Ok(())
}

#[tokio::test]
async fn menu_json_carries_legacy_aliases() -> TestResult {
    let output = run(MockMenuApi::new(), &["menu", "--json"]).await?;
    let products: Vec<Value> = serde_json::from_str(&output)?;

    assert_eq!(products.len(), 3);

    let latte = products.first().ok_or("no products")?;

    assert_eq!(latte.get("nombre"), Some(&json!("Matcha Latte")));
    assert_eq!(latte.get("name"), Some(&json!("Matcha Latte")));
    assert_eq!(latte.get("lleva_leche"), Some(&json!(true)));

    Ok(())
}

#[tokio::test]
async fn dry_run_prints_the_request_without_sending_it() -> TestResult {
    let mut api = MockMenuApi::new();

    api.expect_create_preorder().never();

    let output = run(
        api,
        &[
            "order",
            "--item",
            "1,qty=2,milk=almendras",
            "--item",
            "2,extras=tocino+huevo",
            "--service",
            "para-llevar",
            "--comments",
            "Mesa 4",
            "--dry-run",
        ],
    )
    .await?;

    assert!(output.contains("Total:"));
    assert!(output.contains("$200.00"));
    assert!(output.contains("\"tipo_servicio\": \"para-llevar\""));
    assert!(output.contains("\"comentarios\": \"Mesa 4\""));
    assert!(output.contains("Extras: Tocino, Huevo"));

    Ok(())
}

#[tokio::test]
async fn order_reports_the_new_preorder() -> TestResult {
    let mut api = MockMenuApi::new();

    api.expect_create_preorder().times(1).returning(|_| {
        Ok(PreorderConfirmation {
            id: "88".to_string(),
            total: Some(money(30_00)),
            message: None,
        })
    });

    let output = run(api, &["order", "-i", "2", "--name", "Ana"]).await?;

    assert!(output.contains("Cliente: Ana"));
    assert!(output.contains("Pedido #88 creado."));
    assert!(output.contains("Favor de pasar a barra a pagar."));

    Ok(())
}

#[tokio::test]
async fn order_points_at_the_failing_item() -> TestResult {
    let mut api = MockMenuApi::new();

    api.expect_create_preorder().never();

    let result = run(api, &["order", "-i", "2", "-i", "1"]).await;

    assert!(
        matches!(
            &result,
            Err(CliError::Add {
                position: 2,
                source: AddError::Cart(CartError::MissingModifier { .. }),
            })
        ),
        "unexpected result: {result:?}"
    );

    Ok(())
}

#[test]
fn malformed_item_specs_are_rejected_while_parsing() {
    assert!(Cli::try_parse_from(["matcha", "order", "--item", "abc"]).is_err());
    assert!(Cli::try_parse_from(["matcha", "order"]).is_err());
    assert!(Cli::try_parse_from(["matcha", "order", "-i", "1", "--service", "delivery"]).is_err());
}
