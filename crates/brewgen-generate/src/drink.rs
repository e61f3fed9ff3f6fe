use brewgen_core::{
    CUP_SIZE_IDS, DRINK_ITEM_IDS, DrinkRecord, ICE_AMOUNT_IDS, MenuPriceIndex, SUGAR_LEVEL_IDS,
    TOPPING_IDS, round_cents,
};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::sampler::Sampler;

/// Builds randomized drink lines priced from the menu.
#[derive(Debug, Clone, Copy)]
pub struct DrinkComposer<'a> {
    menu: &'a MenuPriceIndex,
}

impl<'a> DrinkComposer<'a> {
    pub fn new(menu: &'a MenuPriceIndex) -> Self {
        Self { menu }
    }

    /// Compose one drink for `order_id`, record it in the context, and return
    /// it with its contribution to the order subtotal.
    ///
    /// A price miss aborts before a drink id is consumed.
    pub fn compose<S: Sampler>(
        &self,
        order_id: u32,
        ctx: &mut GenerationContext,
        sampler: &mut S,
    ) -> Result<(DrinkRecord, f64), GenerationError> {
        let item_id = sampler.pick_id(&DRINK_ITEM_IDS);
        let cup_size_id = sampler.pick_id(&CUP_SIZE_IDS);
        let sugar_level_id = sampler.pick_id(&SUGAR_LEVEL_IDS);
        let ice_amount_id = sampler.pick_id(&ICE_AMOUNT_IDS);

        let mut price = self.menu.price_of(cup_size_id)? + self.menu.price_of(item_id)?;

        let topping1_id = if sampler.coin() {
            let id = sampler.pick_id(&TOPPING_IDS);
            price += self.menu.price_of(id)?;
            Some(id)
        } else {
            None
        };

        // second topping only rides on a first one
        let topping2_id = if topping1_id.is_some() && sampler.coin() {
            let id = sampler.pick_id(&TOPPING_IDS);
            price += self.menu.price_of(id)?;
            Some(id)
        } else {
            None
        };

        let total_drink_price = round_cents(price);
        let quantity = sampler.int_in(1, 2);

        let drink = DrinkRecord {
            id: ctx.take_drink_id(),
            order_id,
            item_id,
            cup_size_id,
            sugar_level_id,
            ice_amount_id,
            topping1_id,
            topping2_id,
            total_drink_price,
            quantity,
        };
        ctx.record_drink(drink);

        Ok((drink, drink.contribution()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use chrono::NaiveDateTime;

    use super::*;
    use crate::sampler::SeededSampler;

    struct Scripted(VecDeque<u32>);

    impl Sampler for Scripted {
        fn int_in(&mut self, low: u32, high: u32) -> u32 {
            let value = self.0.pop_front().expect("scripted draw available");
            assert!((low..=high).contains(&value), "{value} outside {low}..={high}");
            value
        }

        fn timestamp_between(
            &mut self,
            start: NaiveDateTime,
            _end: NaiveDateTime,
        ) -> NaiveDateTime {
            start
        }
    }

    fn scripted(draws: &[u32]) -> Scripted {
        Scripted(draws.iter().copied().collect())
    }

    fn small_menu() -> MenuPriceIndex {
        MenuPriceIndex::from_prices([(1, 2.50), (151, 3.00), (154, 0.50)])
    }

    #[test]
    fn plain_drink_prices_item_and_cup() {
        let menu = small_menu();
        let composer = DrinkComposer::new(&menu);
        let mut ctx = GenerationContext::new();
        // item, cup, sugar, ice, no topping, quantity
        let mut sampler = scripted(&[1, 151, 177, 183, 2, 1]);

        let (drink, contribution) = composer
            .compose(1, &mut ctx, &mut sampler)
            .expect("compose drink");

        assert_eq!(drink.total_drink_price, 5.50);
        assert_eq!(contribution, 5.50);
        assert_eq!(drink.topping1_id, None);
        assert_eq!(drink.topping2_id, None);
        assert_eq!(drink.id, 1);
        assert_eq!(ctx.drinks().len(), 1);
    }

    #[test]
    fn toppings_add_price_and_quantity_scales() {
        let menu = small_menu();
        let composer = DrinkComposer::new(&menu);
        let mut ctx = GenerationContext::new();
        // topping1 = 154, topping2 = 154, quantity 2
        let mut sampler = scripted(&[1, 151, 180, 186, 1, 154, 1, 154, 2]);

        let (drink, contribution) = composer
            .compose(4, &mut ctx, &mut sampler)
            .expect("compose drink");

        assert_eq!(drink.topping1_id, Some(154));
        assert_eq!(drink.topping2_id, Some(154));
        assert_eq!(drink.total_drink_price, 6.50);
        assert_eq!(contribution, 13.0);
        assert_eq!(drink.order_id, 4);
    }

    #[test]
    fn missing_price_is_fatal_and_keeps_drink_id() {
        let menu = small_menu();
        let composer = DrinkComposer::new(&menu);
        let mut ctx = GenerationContext::new();
        let mut sampler = scripted(&[2, 151, 177, 183]);

        let result = composer.compose(1, &mut ctx, &mut sampler);
        assert!(matches!(
            result,
            Err(GenerationError::Core(brewgen_core::Error::MissingPrice(2)))
        ));
        assert_eq!(ctx.take_drink_id(), 1);
        assert!(ctx.drinks().is_empty());
    }

    #[test]
    fn second_topping_never_appears_alone() {
        let menu = MenuPriceIndex::from_prices(brewgen_core::PARTITION_IDS.map(|id| (id, 1.0)));
        let composer = DrinkComposer::new(&menu);
        let mut ctx = GenerationContext::new();
        let mut sampler = SeededSampler::new(21);

        for _ in 0..2000 {
            let (drink, _) = composer
                .compose(1, &mut ctx, &mut sampler)
                .expect("compose drink");
            assert!(drink.topping2_id.is_none() || drink.topping1_id.is_some());
            assert!(DRINK_ITEM_IDS.contains(&drink.item_id));
            assert!(CUP_SIZE_IDS.contains(&drink.cup_size_id));
            assert!(SUGAR_LEVEL_IDS.contains(&drink.sugar_level_id));
            assert!(ICE_AMOUNT_IDS.contains(&drink.ice_amount_id));
            assert!((1..=2).contains(&drink.quantity));
        }

        let ids: Vec<u32> = ctx.drinks().iter().map(|drink| drink.id).collect();
        assert_eq!(ids, (1..=2000).collect::<Vec<u32>>());
    }
}
