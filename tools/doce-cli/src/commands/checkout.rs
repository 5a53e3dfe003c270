//! Check out: validate the form and print the WhatsApp handoff.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use dialoguer::{Input, Select};
use doce_commerce::checkout::{
    whatsapp_link, Checkout, CheckoutField, Coordinates, LocationError, LocationProvider,
    PaymentMethod,
};
use doce_commerce::CommerceError;

use super::CheckoutArgs;
use crate::commands::cart::print_cart;
use crate::context::Context;

/// Position typed on the command line.
struct TypedLocation(String);

#[async_trait]
impl LocationProvider for TypedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        parse_coordinates(&self.0)
            .ok_or_else(|| LocationError::Unavailable(format!("invalid location '{}'", self.0)))
    }
}

fn parse_coordinates(text: &str) -> Option<Coordinates> {
    let (lat, lng) = text.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    let valid = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng);
    valid.then(|| Coordinates::new(lat, lng))
}

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart_store()?;
    let storefront = &ctx.config.storefront;

    let mut checkout = Checkout::new();
    checkout.set_payment(PaymentMethod::from_id(&args.payment));
    if let Some(name) = args.name {
        checkout.set_name(name);
    }
    if let Some(phone) = args.phone {
        checkout.set_phone(phone);
    }
    if let Some(address) = args.address {
        checkout.set_address(address);
    }
    if let Some(notes) = args.notes {
        checkout.set_notes(notes);
    }
    if let Some(location) = args.location {
        let provider = TypedLocation(location);
        if checkout
            .locate(Some(&provider), storefront.location_timeout())
            .await
            .is_err()
        {
            if let Some(notice) = checkout.location_notice() {
                ctx.output.warn(notice);
            }
        }
    }

    if args.interactive {
        fill_missing(&mut checkout)?;
    }

    let order = match checkout.submit(store.cart()) {
        Ok(order) => order,
        Err(CommerceError::CheckoutIncomplete(field)) => {
            if let Some(notice) = checkout.location_notice() {
                ctx.output.warn(notice);
            }
            bail!("Missing {}. Pass it as a flag or use --interactive.", field);
        }
        Err(e) => return Err(e.into()),
    };

    let message = order.message(storefront);
    let link = whatsapp_link(&storefront.whatsapp_phone, &message)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "order": order,
            "total": order.total().display(),
            "message": message,
            "link": link.as_str(),
        }));
    } else {
        print_cart(ctx, &store);
        ctx.output.header("Mensagem do pedido");
        println!("{}", message);
        if let Some(submitted) = DateTime::from_timestamp(order.created_at, 0) {
            ctx.output.kv(
                "Gerado em",
                &submitted.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string(),
            );
        }
        ctx.output.success("Abra o link abaixo para enviar o pedido pelo WhatsApp:");
        println!("{}", link);
    }

    if !args.keep_cart {
        store.clear();
        ctx.output.debug("Cart cleared after checkout");
    }

    Ok(())
}

/// Prompt for every field the form still lacks.
fn fill_missing(checkout: &mut Checkout) -> Result<()> {
    for field in checkout.missing_fields() {
        match field {
            CheckoutField::Name => {
                let name: String = Input::new().with_prompt("Nome completo").interact_text()?;
                checkout.set_name(name);
            }
            CheckoutField::Phone => {
                let phone: String = Input::new().with_prompt("Telefone").interact_text()?;
                checkout.set_phone(phone);
            }
            CheckoutField::Payment => {
                let labels: Vec<String> =
                    PaymentMethod::OFFERED.iter().map(|m| m.label()).collect();
                let choice = Select::new()
                    .with_prompt("Método de pagamento")
                    .items(&labels)
                    .default(0)
                    .interact()?;
                checkout.set_payment(PaymentMethod::OFFERED[choice].clone());
            }
            CheckoutField::Destination => {
                let address: String = Input::new()
                    .with_prompt("Endereço (ou \"lat,lng\")")
                    .interact_text()?;
                match parse_coordinates(&address) {
                    Some(coords) => checkout.set_location(coords),
                    None => checkout.set_address(address),
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_coordinates() {
        let coords = parse_coordinates("-1.4558, -48.4902").unwrap();
        assert_eq!(coords, Coordinates::new(-1.4558, -48.4902));
        assert!(parse_coordinates("Rua das Flores, 10").is_none());
        assert!(parse_coordinates("91,0").is_none());
    }

    #[tokio::test]
    async fn test_typed_location_feeds_checkout() {
        let mut checkout = Checkout::new();
        checkout.set_address("Rua das Flores, 10");

        let provider = TypedLocation("-1.45,-48.49".to_string());
        checkout
            .locate(Some(&provider), Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(checkout.customer.address(), None);

        let bad = TypedLocation("nowhere".to_string());
        assert!(checkout.locate(Some(&bad), Duration::from_secs(1)).await.is_err());
        assert!(checkout.location_notice().is_some());
    }
}
