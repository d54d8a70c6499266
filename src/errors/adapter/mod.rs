pub mod postcard;
