//! View assembly — resolve image URLs and compute display prices

use shared::models::{DealItemView, FoodItem, FoodItemView, MenuItemView};
use shared::pricing;

use crate::db::deals::DealItemRow;
use crate::db::menus::MenuItemRow;
use crate::images::ImageStore;

pub async fn food_item_view(images: &ImageStore, item: FoodItem) -> FoodItemView {
    let image_url = images.resolve(&item.image).await;
    FoodItemView { item, image_url }
}

pub async fn food_item_views(images: &ImageStore, items: Vec<FoodItem>) -> Vec<FoodItemView> {
    let mut views = Vec::with_capacity(items.len());
    for item in items {
        views.push(food_item_view(images, item).await);
    }
    views
}

pub async fn menu_item_view(images: &ImageStore, row: MenuItemRow) -> MenuItemView {
    let image_url = images.resolve(&row.item.image).await;
    let effective_price =
        pricing::visible_discount(row.item.price, row.discount_type, row.discount_value);
    MenuItemView {
        item: row.item,
        display_order: row.display_order,
        discount_type: row.discount_type,
        discount_value: row.discount_value,
        effective_price,
        image_url,
    }
}

pub async fn menu_item_views(images: &ImageStore, rows: Vec<MenuItemRow>) -> Vec<MenuItemView> {
    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        views.push(menu_item_view(images, row).await);
    }
    views
}

pub async fn deal_item_views(images: &ImageStore, rows: Vec<DealItemRow>) -> Vec<DealItemView> {
    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        let image_url = images.resolve(&row.item.image).await;
        views.push(DealItemView {
            item: row.item,
            display_order: row.display_order,
            image_url,
        });
    }
    views
}
