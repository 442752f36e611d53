pub mod create_layer;
