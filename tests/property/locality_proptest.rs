//! Property-based tests for locality classification

use proptest::prelude::*;
use std::net::{Ipv4Addr, SocketAddr};

use lanshare::backend::locality::classifier::{classify, LocalityRequest};
use lanshare::backend::locality::ServerAddress;

fn server() -> ServerAddress {
    ServerAddress {
        ip: Ipv4Addr::new(192, 168, 1, 10),
        source: "static",
        degraded: false,
    }
}

fn any_v4() -> impl Strategy<Value = Ipv4Addr> {
    any::<[u8; 4]>().prop_map(Ipv4Addr::from)
}

proptest! {
    #[test]
    fn test_direct_access_never_prompts(
        host_ip in any_v4(),
        port in proptest::option::of(1u16..),
        client in any_v4(),
        probe in any::<bool>(),
    ) {
        let host = match port {
            Some(port) => format!("{}:{}", host_ip, port),
            None => host_ip.to_string(),
        };
        let request = LocalityRequest {
            host,
            forwarded_for: Some(client.to_string()),
            ..Default::default()
        };

        let signal = classify(&request, &server(), 9405, Some(probe));

        prop_assert!(signal.is_direct_address_access);
        prop_assert!(!signal.should_prompt_switch);
    }

    #[test]
    fn test_named_access_counts_as_same_network(
        name in "[a-z]{1,12}\\.example\\.com",
        client in any_v4(),
        peer_port in any::<u16>(),
    ) {
        let request = LocalityRequest {
            host: name,
            peer: Some(SocketAddr::from((client, peer_port))),
            ..Default::default()
        };

        let signal = classify(&request, &server(), 9405, Some(false));

        prop_assert!(!signal.is_direct_address_access);
        prop_assert!(signal.is_client_same_network);
        // Server address is a real LAN address, so a failed probe still prompts
        prop_assert!(signal.should_prompt_switch);
    }

    #[test]
    fn test_private_forwarded_client_is_chosen(
        b in any::<u8>(),
        c in any::<u8>(),
        d in 1u8..,
    ) {
        let client = Ipv4Addr::new(10, b, c, d);
        let request = LocalityRequest {
            host: "share.example.com".to_string(),
            forwarded_for: Some(format!("100.64.0.1, {}", client)),
            peer: Some(SocketAddr::from(([127, 0, 0, 1], 40000))),
            ..Default::default()
        };

        let signal = classify(&request, &server(), 9405, None);

        prop_assert_eq!(signal.client_address, client.to_string());
    }
}
