pub mod add_item_dialog;
