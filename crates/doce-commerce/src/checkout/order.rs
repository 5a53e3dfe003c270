//! Orders and the outbound WhatsApp message.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::cart::{items_total, LineItem};
use crate::checkout::{CustomerInfo, PaymentMethod};
use crate::config::StorefrontConfig;
use crate::error::CommerceError;
use crate::money::Money;

/// A submitted order. Only ever formatted, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub items: Vec<LineItem>,
    pub customer: CustomerInfo,
    pub payment: PaymentMethod,
    /// Unix timestamp of submission.
    pub created_at: i64,
}

impl Order {
    /// Sum of line subtotals.
    pub fn total(&self) -> Money {
        items_total(&self.items)
    }

    /// Render the order as a WhatsApp message.
    ///
    /// Uses WhatsApp's `*bold*` markup. Address, location and notes lines
    /// are left out when absent.
    pub fn message(&self, config: &StorefrontConfig) -> String {
        let customer = &self.customer;
        let mut out = format!("*Novo Pedido - {}*\n\n", config.store_name);
        out.push_str(&format!("*Nome:* {}\n", customer.name));
        out.push_str(&format!("*Telefone:* {}\n\n", customer.phone));

        if let Some(address) = customer.address() {
            out.push_str(&format!("*Endereço:* {}\n\n", address));
        }
        if let Some(coords) = customer.location() {
            out.push_str("*Localização Exata:*\n");
            out.push_str(&coords.maps_link(&config.maps_base_url));
            out.push_str(&format!("\n(Lat: {}, Lng: {})\n\n", coords.lat, coords.lng));
        }

        out.push_str("*Itens do Pedido:*\n");
        for item in &self.items {
            out.push_str(&item_lines(item));
        }

        out.push_str(&format!("\n*Valor Total:* {}\n\n", self.total()));
        out.push_str(&format!("*Método de Pagamento:* {}\n", self.payment.label()));
        if let Some(notes) = customer.notes() {
            out.push_str(&format!("*Observações:* {}\n", notes));
        }
        out
    }
}

fn item_lines(item: &LineItem) -> String {
    let mut lines = if item.size.is_empty() {
        format!("- {} x{}: {}\n", item.name, item.quantity, item.subtotal())
    } else {
        format!(
            "- {} ({}) x{}: {}\n",
            item.name,
            item.size,
            item.quantity,
            item.subtotal()
        )
    };

    let Some(details) = &item.details else {
        return lines;
    };
    if details.is_package() {
        for (i, unit) in details.units.iter().enumerate() {
            lines.push_str(&format!(
                "  → Ovo {}: Casca {} com Recheio {}\n",
                i + 1,
                unit.shell_name,
                unit.filling_name
            ));
        }
    } else if let (Some(shell), Some(filling)) = (&details.shell_name, &details.filling_name) {
        lines.push_str(&format!("  → Casca: {}\n", shell));
        lines.push_str(&format!("  → Recheio: {}\n", filling));
    }
    lines
}

/// `https://wa.me/<phone>?text=<message>` with the message URL-encoded.
pub fn whatsapp_link(phone: &str, message: &str) -> Result<Url, CommerceError> {
    let mut url = Url::parse(&format!("https://wa.me/{}", phone.trim()))
        .map_err(|e| CommerceError::InvalidLink(format!("{}: {}", phone, e)))?;
    url.query_pairs_mut().append_pair("text", message);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Cart, UnitSelection, MAX_QUANTITY_PER_ITEM};
    use crate::catalog::{Catalog, ProductKind};
    use crate::checkout::Coordinates;
    use crate::ids::{EggSizeId, FillingId, PackageId, ProductId, ShellId};
    use pretty_assertions::assert_eq;

    fn sample_cart(catalog: &Catalog) -> Cart {
        let mut cart = Cart::new();
        let cake = catalog.cake(ProductId::new(1)).unwrap();
        cart.add_item(LineItem::product(ProductKind::Cake, cake, "400ml", 2).unwrap())
            .unwrap();

        let egg = LineItem::single_egg(
            &catalog.size(EggSizeId::new(1)),
            &catalog.shell(ShellId::new(2)),
            &catalog.filling(FillingId::new(3)),
            1,
        );
        cart.add_item(egg).unwrap();

        let units = vec![
            UnitSelection::new(&catalog.shell(ShellId::new(1)), &catalog.filling(FillingId::new(2))),
            UnitSelection::new(&catalog.shell(ShellId::new(3)), &catalog.filling(FillingId::new(2))),
        ];
        let package = catalog.package(PackageId::new(2));
        cart.add_item(LineItem::egg_package(&package, units)).unwrap();
        cart
    }

    fn order(customer: CustomerInfo) -> Order {
        let catalog = Catalog::builtin().unwrap();
        Order {
            items: sample_cart(&catalog).items().to_vec(),
            customer,
            payment: PaymentMethod::Pix,
            created_at: 0,
        }
    }

    #[test]
    fn test_message_with_address() {
        let mut customer = CustomerInfo::new("Ana Souza", "91988887777");
        customer.set_address("Rua das Flores, 10");
        customer.set_notes("Sem cartão de visita");

        let message = order(customer).message(&StorefrontConfig::default());
        let expected = "\
*Novo Pedido - Doce Presente*

*Nome:* Ana Souza
*Telefone:* 91988887777

*Endereço:* Rua das Flores, 10

*Itens do Pedido:*
- Bolo de Ninho com Nutella (400ml) x2: R$ 36.00
- Ovo de Colher 250g (250g) x1: R$ 39.90
  → Casca: Meio Amargo
  → Recheio: Maracujá
- Trio de Ovinhos (2 ovos) x1: R$ 59.90
  → Ovo 1: Casca Ao Leite com Recheio Ninho
  → Ovo 2: Casca Branco com Recheio Ninho

*Valor Total:* R$ 135.80

*Método de Pagamento:* PIX
*Observações:* Sem cartão de visita
";
        assert_eq!(message, expected);
    }

    #[test]
    fn test_message_with_location() {
        let mut customer = CustomerInfo::new("Ana", "9199");
        customer.set_location(Coordinates::new(-1.4558, -48.4902));

        let message = order(customer).message(&StorefrontConfig::default());
        assert!(message.contains(
            "*Localização Exata:*\nhttps://www.google.com/maps?q=-1.4558,-48.4902\n(Lat: -1.4558, Lng: -48.4902)\n\n"
        ));
        assert!(!message.contains("*Endereço:*"));
        assert!(!message.contains("*Observações:*"));
    }

    #[test]
    fn test_order_total_matches_cart_total() {
        let catalog = Catalog::builtin().unwrap();
        let mut cart = sample_cart(&catalog);
        let order = order(CustomerInfo::new("Ana", "9199"));
        assert_eq!(order.total(), cart.total());

        // Both saturate the same way on absurd quantities.
        let id = cart.items()[0].id.clone();
        cart.update_quantity(&id, MAX_QUANTITY_PER_ITEM).unwrap();
        let mut huge = cart.items().to_vec();
        huge[0].unit_price = Money::brl(i64::MAX / 2);
        assert_eq!(items_total(&huge), Money::brl(i64::MAX));
        assert_eq!(Cart::from_items(huge.clone()).total(), items_total(&huge));
    }

    #[test]
    fn test_unknown_payment_upper_cased() {
        let mut order = order(CustomerInfo::new("Ana", "9199"));
        order.payment = PaymentMethod::from_id("vale");
        let message = order.message(&StorefrontConfig::default());
        assert!(message.contains("*Método de Pagamento:* VALE\n"));
    }

    #[test]
    fn test_whatsapp_link_encodes_message() {
        let link = whatsapp_link("+5591900000000", "*Nome:* Ana & Zé\nR$ 10.00").unwrap();
        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/+5591900000000");
        let text = link
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned());
        assert_eq!(text.as_deref(), Some("*Nome:* Ana & Zé\nR$ 10.00"));
        assert!(!link.as_str().contains('\n'));
    }
}
