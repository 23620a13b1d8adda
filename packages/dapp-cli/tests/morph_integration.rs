//! Integration tests against the Morph Holesky deployments
//!
//! These tests require network access. `DAPP_RPC_URL` overrides the public
//! endpoint; `AUCTION_FACTORY_ADDRESS` enables the auction test.
//!
//! Run with: cargo test --test morph_integration -- --ignored --nocapture

use std::env;

use alloy::primitives::Address;
use crosslayer_rs::evm::EvmReader;
use dapp_cli::auction::client::newest_first;
use dapp_cli::auction::AuctionClient;
use dapp_cli::config::{
    DEFAULT_BOOKING_ADDRESS, DEFAULT_RPC_URL, DEFAULT_TOKEN_ADDRESS, HOTEL_ADMIN_ADDRESS,
};
use dapp_cli::hotel::HotelClient;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("info,dapp_cli=debug"))
        .with_test_writer()
        .try_init();
}

fn rpc_url() -> String {
    env::var("DAPP_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string())
}

#[tokio::test]
#[ignore = "requires Morph Holesky RPC"]
async fn test_hotel_rooms_are_readable() {
    init_tracing();
    let reader = EvmReader::new(&rpc_url()).expect("reader");
    let client = HotelClient::new(&reader, DEFAULT_BOOKING_ADDRESS, DEFAULT_TOKEN_ADDRESS);

    let owner = client.owner().await.expect("owner");
    assert_eq!(owner, HOTEL_ADMIN_ADDRESS);
    assert_eq!(client.payment_token().await.expect("token"), DEFAULT_TOKEN_ADDRESS);

    let rooms = client.rooms().await.expect("rooms");
    let count = client.room_count().await.expect("roomCount");
    assert_eq!(alloy::primitives::U256::from(rooms.len()), count);

    for room in &rooms {
        assert!(!room.category_label().is_empty());
        let details = client.room_details(room.id).await.expect("room details");
        assert_eq!(details.category, room.category);
        assert_eq!(details.price_per_night, room.price_per_night);
    }
}

#[tokio::test]
#[ignore = "requires Morph Holesky RPC and AUCTION_FACTORY_ADDRESS"]
async fn test_auctions_are_readable() {
    init_tracing();
    let Some(factory) = env::var("AUCTION_FACTORY_ADDRESS")
        .ok()
        .and_then(|raw| raw.parse::<Address>().ok())
    else {
        eprintln!("AUCTION_FACTORY_ADDRESS not set, skipping");
        return;
    };

    let reader = EvmReader::new(&rpc_url()).expect("reader");
    let client = AuctionClient::new(&reader, factory);

    let auctions = client.auctions().await.expect("auctions");
    if let Some(first) = auctions.first() {
        assert_eq!(client.auction_at(0).await.expect("auctions(0)"), *first);
        let info = client.info(*first).await.expect("info");
        assert_eq!(info.address, *first);
    }

    let newest = newest_first(auctions.clone());
    assert_eq!(newest.first(), auctions.last());
}
