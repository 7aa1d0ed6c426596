//! Pure reducers: `(state, action, now) -> state`.
//!
//! No I/O and no clock access. The caller supplies `now`, which becomes the
//! new `last_updated` (and `updated_at` of any touched line).

use chrono::{DateTime, Utc};

use super::actions::Action;
use super::item::{CartItem, Product};
use super::state::{AppState, CartState};
use crate::types::{ProductId, Quantity};

/// Apply an action to the whole application state.
#[must_use]
pub fn reduce(state: &AppState, action: &Action, now: DateTime<Utc>) -> AppState {
    AppState {
        cart: reduce_cart(&state.cart, action, now),
        search: reduce_search(&state.search, action),
    }
}

/// Apply an action to the cart slice.
///
/// Every cart action yields a state whose total is recomputed from its items
/// and whose `last_updated` is `now`, even when the items did not change.
#[must_use]
pub fn reduce_cart(state: &CartState, action: &Action, now: DateTime<Utc>) -> CartState {
    match action {
        Action::AddToCart(product) => add_item(state, product, now),
        Action::RemoveFromCart(id) => remove_item(state, *id, now),
        Action::UpdateQuantity {
            product_id,
            quantity,
        } => set_quantity(state, *product_id, *quantity, now),
        Action::ClearCart => CartState::empty(now),
        Action::SetSearchTerm(_) => state.clone(),
    }
}

/// Apply an action to the search slice.
#[must_use]
pub fn reduce_search(term: &str, action: &Action) -> String {
    match action {
        Action::SetSearchTerm(next) => next.clone(),
        Action::AddToCart(_)
        | Action::RemoveFromCart(_)
        | Action::UpdateQuantity { .. }
        | Action::ClearCart => term.to_owned(),
    }
}

fn add_item(state: &CartState, product: &Product, now: DateTime<Utc>) -> CartState {
    let mut items = state.items().to_vec();
    match items.iter_mut().find(|item| item.id() == product.id) {
        Some(existing) => {
            *existing = existing.with_quantity(existing.quantity().incremented(), now);
        }
        None => items.push(CartItem::from_product(product, now)),
    }
    CartState::with_items(items, now)
}

fn remove_item(state: &CartState, id: ProductId, now: DateTime<Utc>) -> CartState {
    let items = state
        .items()
        .iter()
        .filter(|item| item.id() != id)
        .cloned()
        .collect();
    CartState::with_items(items, now)
}

fn set_quantity(
    state: &CartState,
    id: ProductId,
    requested: i64,
    now: DateTime<Utc>,
) -> CartState {
    let quantity = Quantity::clamped(requested);
    let items = state
        .items()
        .iter()
        .map(|item| {
            if item.id() == id {
                item.with_quantity(quantity, now)
            } else {
                item.clone()
            }
        })
        .collect();
    CartState::with_items(items, now)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart::actions::{
        add_to_cart, clear_cart, remove_from_cart, set_search_term, update_quantity,
    };
    use crate::cart::state::calculate_total;
    use crate::types::Price;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn product(id: i64, dollars: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {id}"),
            Price::new(Decimal::new(dollars, 0)).unwrap(),
            format!("https://cdn.example.com/{id}.png"),
        )
    }

    fn apply(state: CartState, actions: &[Action]) -> CartState {
        actions
            .iter()
            .enumerate()
            .fold(state, |state, (i, action)| {
                let now = t0() + Duration::seconds(i64::try_from(i).unwrap() + 1);
                reduce_cart(&state, action, now)
            })
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    #[test]
    fn test_add_to_empty_cart() {
        let cart = apply(CartState::empty(t0()), &[add_to_cart(product(1, 10))]);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity().get(), 1);
        assert_eq!(cart.total(), Decimal::new(10, 0));
    }

    #[test]
    fn test_add_same_product_twice_increments() {
        let cart = apply(
            CartState::empty(t0()),
            &[add_to_cart(product(1, 10)), add_to_cart(product(1, 10))],
        );

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity().get(), 2);
        assert_eq!(cart.total(), Decimal::new(20, 0));
    }

    #[test]
    fn test_repeat_add_refreshes_updated_at_only() {
        let cart = apply(
            CartState::empty(t0()),
            &[add_to_cart(product(1, 10)), add_to_cart(product(1, 10))],
        );
        let item = &cart.items()[0];

        assert_eq!(item.added_at(), t0() + Duration::seconds(1));
        assert_eq!(item.updated_at(), t0() + Duration::seconds(2));
        assert_eq!(cart.last_updated(), t0() + Duration::seconds(2));
    }

    #[test]
    fn test_remove_leaves_other_items() {
        let cart = apply(
            CartState::empty(t0()),
            &[
                add_to_cart(product(1, 10)),
                add_to_cart(product(2, 5)),
                remove_from_cart(ProductId::new(1)),
            ],
        );

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id(), ProductId::new(2));
        assert_eq!(cart.total(), Decimal::new(5, 0));
    }

    #[test]
    fn test_set_quantity_twice() {
        let cart = apply(
            CartState::empty(t0()),
            &[
                add_to_cart(product(1, 10)),
                update_quantity(ProductId::new(1), 3),
                update_quantity(ProductId::new(1), 3),
            ],
        );

        assert_eq!(cart.items()[0].quantity().get(), 3);
        assert_eq!(cart.total(), Decimal::new(30, 0));
    }

    #[test]
    fn test_insertion_order_is_display_order() {
        let cart = apply(
            CartState::empty(t0()),
            &[
                add_to_cart(product(3, 1)),
                add_to_cart(product(1, 1)),
                add_to_cart(product(2, 1)),
                add_to_cart(product(3, 1)),
            ],
        );
        let ids: Vec<i64> = cart.items().iter().map(|i| i.id().as_i64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    // =========================================================================
    // Clamping
    // =========================================================================

    #[test]
    fn test_set_quantity_below_one_clamps_to_one() {
        for requested in [0, -1, -500] {
            let cart = apply(
                CartState::empty(t0()),
                &[
                    add_to_cart(product(1, 10)),
                    update_quantity(ProductId::new(1), 5),
                    update_quantity(ProductId::new(1), requested),
                ],
            );
            assert_eq!(cart.items()[0].quantity(), Quantity::MIN);
            assert_eq!(cart.total(), Decimal::new(10, 0));
        }
    }

    #[test]
    fn test_set_quantity_above_max_clamps_to_max() {
        let cart = apply(
            CartState::empty(t0()),
            &[
                add_to_cart(product(1, 2)),
                update_quantity(ProductId::new(1), 500),
            ],
        );
        assert_eq!(cart.items()[0].quantity(), Quantity::MAX);
        assert_eq!(cart.total(), Decimal::new(198, 0));
    }

    #[test]
    fn test_add_stops_at_max() {
        let cart = apply(
            CartState::empty(t0()),
            &[
                add_to_cart(product(1, 1)),
                update_quantity(ProductId::new(1), 99),
                add_to_cart(product(1, 1)),
            ],
        );
        assert_eq!(cart.items()[0].quantity(), Quantity::MAX);
    }

    // =========================================================================
    // No-ops
    // =========================================================================

    #[test]
    fn test_set_quantity_on_absent_id_keeps_contents() {
        let before = apply(CartState::empty(t0()), &[add_to_cart(product(1, 10))]);
        let after = reduce_cart(
            &before,
            &update_quantity(ProductId::new(99), 4),
            t0() + Duration::hours(1),
        );

        assert!(after.same_contents(&before));
        assert_eq!(after.last_updated(), t0() + Duration::hours(1));
    }

    #[test]
    fn test_remove_absent_id_is_idempotent() {
        let start = apply(CartState::empty(t0()), &[add_to_cart(product(1, 10))]);
        let now = t0() + Duration::hours(1);
        let once = reduce_cart(&start, &remove_from_cart(ProductId::new(7)), now);
        let twice = reduce_cart(&once, &remove_from_cart(ProductId::new(7)), now);

        assert_eq!(once, twice);
        assert!(once.same_contents(&start));
    }

    #[test]
    fn test_clear_yields_canonical_empty_state() {
        let cart = apply(
            CartState::empty(t0()),
            &[
                add_to_cart(product(1, 10)),
                add_to_cart(product(2, 4)),
                clear_cart(),
            ],
        );
        assert_eq!(cart, CartState::empty(t0() + Duration::seconds(3)));
    }

    #[test]
    fn test_search_term_does_not_touch_cart() {
        let cart = apply(CartState::empty(t0()), &[add_to_cart(product(1, 10))]);
        let state = AppState::with_cart(cart.clone());

        let next = reduce(&state, &set_search_term("lipstick"), t0() + Duration::days(1));

        assert_eq!(next.search(), "lipstick");
        assert_eq!(next.cart(), &cart);
    }

    #[test]
    fn test_cart_actions_keep_search_term() {
        let state = reduce(&AppState::new(t0()), &set_search_term("perfume"), t0());
        let next = reduce(&state, &add_to_cart(product(1, 1)), t0());
        let next = reduce(&next, &clear_cart(), t0());
        assert_eq!(next.search(), "perfume");
    }

    // =========================================================================
    // Properties
    // =========================================================================

    fn action_strategy() -> impl Strategy<Value = Action> {
        let id = 1i64..6;
        prop_oneof![
            (id.clone(), 0i64..200).prop_map(|(id, dollars)| add_to_cart(product(id, dollars))),
            id.clone().prop_map(|id| remove_from_cart(ProductId::new(id))),
            (id, -20i64..150).prop_map(|(id, q)| update_quantity(ProductId::new(id), q)),
            Just(clear_cart()),
            "[a-z]{0,8}".prop_map(Action::SetSearchTerm),
        ]
    }

    proptest! {
        #[test]
        fn total_always_matches_items(actions in proptest::collection::vec(action_strategy(), 0..40)) {
            let mut cart = CartState::empty(t0());
            for action in &actions {
                cart = reduce_cart(&cart, action, t0());
                prop_assert_eq!(cart.total(), calculate_total(cart.items()));
                if cart.is_empty() {
                    prop_assert!(cart.total().is_zero());
                }
            }
        }

        #[test]
        fn ids_stay_unique_and_quantities_in_range(actions in proptest::collection::vec(action_strategy(), 0..40)) {
            let mut cart = CartState::empty(t0());
            for action in &actions {
                cart = reduce_cart(&cart, action, t0());
                let mut ids: Vec<_> = cart.items().iter().map(CartItem::id).collect();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), cart.len());
                for item in cart.items() {
                    prop_assert!((1..=99).contains(&item.quantity().get()));
                }
            }
        }

        #[test]
        fn distinct_adds_count_occurrences(ids in proptest::collection::vec(1i64..10, 0..60)) {
            let mut cart = CartState::empty(t0());
            for id in &ids {
                cart = reduce_cart(&cart, &add_to_cart(product(*id, 1)), t0());
            }

            let mut distinct = ids.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(cart.len(), distinct.len());

            for id in distinct {
                let occurrences = ids.iter().filter(|x| **x == id).count();
                let quantity = cart.item(ProductId::new(id)).map(|i| i.quantity().get());
                prop_assert_eq!(quantity, Some(u32::try_from(occurrences.min(99)).unwrap()));
            }
        }
    }
}
