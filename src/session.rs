//! Per-visitor session state: cart, signed-in user, one-shot flash notice.
//!
//! The cart is a map of product-id string to quantity. Ids are kept as
//! raw strings on purpose: add-to-cart never validates them, and the
//! read paths (cart view, checkout) skip entries that fail to parse or
//! no longer resolve to a product.

use std::collections::{BTreeMap, HashMap};

use tower_sessions::Session;

use crate::{error::AppResult, models::User};

pub mod keys {
    pub const CART: &str = "cart";
    pub const USER_ID: &str = "user_id";
    pub const USERNAME: &str = "username";
    pub const FLASH: &str = "flash";
}

pub type Cart = BTreeMap<String, i64>;

/// Data every rendered page needs: the pending flash notice (consumed
/// here) and the signed-in username for the nav bar.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub flash: Option<String>,
    pub username: Option<String>,
}

pub async fn page_context(session: &Session) -> AppResult<PageContext> {
    Ok(PageContext {
        flash: take_flash(session).await?,
        username: current_username(session).await?,
    })
}

pub async fn cart(session: &Session) -> AppResult<Cart> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

pub async fn set_cart(session: &Session, cart: &Cart) -> AppResult<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

pub async fn flash(session: &Session, message: impl Into<String>) -> AppResult<()> {
    session.insert(keys::FLASH, message.into()).await?;
    Ok(())
}

pub async fn take_flash(session: &Session) -> AppResult<Option<String>> {
    Ok(session.remove::<String>(keys::FLASH).await?)
}

pub async fn sign_in(session: &Session, user: &User) -> AppResult<()> {
    session.insert(keys::USER_ID, user.id).await?;
    session.insert(keys::USERNAME, &user.username).await?;
    Ok(())
}

pub async fn current_username(session: &Session) -> AppResult<Option<String>> {
    Ok(session.get::<String>(keys::USERNAME).await?)
}

/// Cumulative add: increments an existing entry or inserts a new one.
pub fn add_item(cart: &mut Cart, product_id: &str, quantity: i64) {
    *cart.entry(product_id.to_string()).or_insert(0) += quantity;
}

/// Quantity as submitted by a form: absent defaults to 1, anything
/// unparsable is coerced to 0 rather than rejected.
pub fn parse_quantity(raw: Option<&str>) -> i64 {
    match raw {
        None => 1,
        Some(value) => value.trim().parse().unwrap_or(0),
    }
}

/// Bulk update is a full replacement, not a merge: every submitted
/// (product id, quantity) pair with a parsable positive quantity makes
/// it into the new cart, everything else is discarded.
pub fn replace_from_form(form: &HashMap<String, String>) -> Cart {
    form.iter()
        .filter_map(|(product_id, raw)| {
            let quantity = raw.trim().parse::<i64>().unwrap_or(0);
            (quantity > 0).then(|| (product_id.clone(), quantity))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_cumulative() {
        let mut cart = Cart::new();
        add_item(&mut cart, "p1", 2);
        add_item(&mut cart, "p1", 3);
        add_item(&mut cart, "p2", 1);
        assert_eq!(cart.get("p1"), Some(&5));
        assert_eq!(cart.get("p2"), Some(&1));
    }

    #[test]
    fn quantity_defaults_and_coercion() {
        assert_eq!(parse_quantity(None), 1);
        assert_eq!(parse_quantity(Some("4")), 4);
        assert_eq!(parse_quantity(Some(" 7 ")), 7);
        assert_eq!(parse_quantity(Some("lots")), 0);
        assert_eq!(parse_quantity(Some("")), 0);
    }

    #[test]
    fn replace_discards_invalid_quantities() {
        let form = HashMap::from([
            ("p1".to_string(), "2".to_string()),
            ("p2".to_string(), "0".to_string()),
            ("p3".to_string(), "-1".to_string()),
            ("p4".to_string(), "abc".to_string()),
        ]);
        let cart = replace_from_form(&form);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("p1"), Some(&2));
    }

    #[test]
    fn replace_is_a_full_overwrite() {
        // Only the submitted entries survive; the caller swaps the
        // whole cart for the result.
        let form = HashMap::from([("p9".to_string(), "1".to_string())]);
        let cart = replace_from_form(&form);
        assert_eq!(cart.keys().collect::<Vec<_>>(), vec!["p9"]);
    }
}
