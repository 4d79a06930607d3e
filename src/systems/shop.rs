//! Shop transactions: wallet-checked sales routed into typed item holders.

use hecs::{Entity, World};
use tracing::warn;

use crate::components::{ItemDef, ItemHolders, ItemKind, Shop, Wallet};
use crate::events::{EventQueue, GameEvent};

/// Sell stock entry `index` to `player`. Returns true when the sale went
/// through; a short wallet or a bad index leaves everything untouched.
pub fn sell_item(
    world: &mut World,
    shop: Entity,
    player: Entity,
    index: usize,
    events: &mut EventQueue,
) -> bool {
    // Read the stock entry up front
    let (item, price, amount) = {
        let Ok(stock) = world.get::<&Shop>(shop) else {
            return false;
        };
        let Some(entry) = stock.stock.get(index) else {
            return false;
        };
        (entry.item.clone(), entry.price, entry.amount)
    };

    // Wallet check before anything changes hands
    {
        let Ok(wallet) = world.get::<&Wallet>(player) else {
            return false;
        };
        if !wallet.can_afford(price) {
            warn!(item = %item.name, price, money = wallet.money, "not enough money");
            return false;
        }
    }

    // Route the purchase into the matching holder
    if !add_to_holders(world, player, &item, amount) {
        return false;
    }

    // Debit the wallet
    if let Ok(mut wallet) = world.get::<&mut Wallet>(player) {
        wallet.pay(price);
    }

    // Non-stackable stock leaves the shelf once sold
    if !item.stackable {
        if let Ok(mut stock) = world.get::<&mut Shop>(shop) {
            stock.stock.remove(index);
        }
    }

    events.push(GameEvent::ItemSold {
        shop,
        item: item.name.clone(),
        price,
    });
    true
}

/// Put a purchased item into the holder its kind selects. Abilities and
/// runes arrive one at a time; other items arrive as the whole stock bunch.
fn add_to_holders(world: &mut World, player: Entity, item: &ItemDef, amount: u32) -> bool {
    let Ok(mut holders) = world.get::<&mut ItemHolders>(player) else {
        return false;
    };
    match item.kind {
        ItemKind::Ability => holders.abilities.push(item.clone()),
        ItemKind::Rune => holders.runes.push(item.clone()),
        ItemKind::Other => {
            for _ in 0..amount {
                holders.other.push(item.clone());
            }
        }
    }
    true
}
