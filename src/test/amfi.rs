#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rust_decimal_macros::dec;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use crate::api::{
        AmfiNavResolver, LookupMiss, PriceLookup, PriceResolver,
        amfi::find_nav,
    };

    /// Serves one HTTP response on a local port and returns the list URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/NAVAll.txt", addr)
    }

    const NAV_LIST: &str = "\
Scheme Code;ISIN Div Payout/ ISIN Growth;ISIN Div Reinvestment;Scheme Name;Net Asset Value;Date

Open Ended Schemes(Equity Scheme - Flexi Cap Fund)

PPFAS Mutual Fund

120503;INF879O01027;-;Parag Parikh Flexi Cap Fund - Direct Plan - Growth;85.1234;17-Oct-2026\r
120767;INF109K01Z48;-;ICICI Prudential Infrastructure Fund - Direct Plan - Growth;190.07;17-Oct-2026
118834;INF109K01Y98;-;ICICI Prudential Corporate Bond Fund - Direct Plan - Growth;N.A.;17-Oct-2026
119551;-
";

    #[test]
    fn finds_nav_in_second_to_last_field() {
        assert_eq!(find_nav(NAV_LIST, "120503"), PriceLookup::Found(dec!(85.1234)));
        assert_eq!(find_nav(NAV_LIST, "120767"), PriceLookup::Found(dec!(190.07)));
    }

    #[test]
    fn unknown_code_is_not_listed() {
        assert_eq!(
            find_nav(NAV_LIST, "999999"),
            PriceLookup::Miss(LookupMiss::NotListed)
        );
    }

    #[test]
    fn first_prefix_match_wins() {
        assert_eq!(find_nav(NAV_LIST, "1205"), PriceLookup::Found(dec!(85.1234)));
    }

    #[test]
    fn unparseable_nav_is_malformed() {
        let lookup = find_nav(NAV_LIST, "118834");

        assert!(matches!(lookup, PriceLookup::Miss(LookupMiss::Malformed(_))));
        assert_eq!(lookup.price(), None);
    }

    #[test]
    fn short_record_is_malformed() {
        let lookup = find_nav("119551\n", "119551");

        assert!(matches!(lookup, PriceLookup::Miss(LookupMiss::Malformed(_))));
    }

    #[test]
    fn two_field_record_reads_first_field() {
        // "119551;-" has "119551" as its second-to-last field
        assert_eq!(find_nav(NAV_LIST, "119551"), PriceLookup::Found(dec!(119551)));
    }

    #[tokio::test]
    async fn unreachable_source_is_unavailable() {
        let resolver =
            AmfiNavResolver::new("http://127.0.0.1:1/NAVAll.txt", Duration::from_secs(2)).unwrap();

        let lookup = resolver.resolve("120503").await;

        assert!(matches!(lookup, PriceLookup::Miss(LookupMiss::Unavailable(_))));
    }

    #[tokio::test]
    async fn served_list_resolves_the_nav() {
        let url = serve_once("200 OK", NAV_LIST).await;
        let resolver = AmfiNavResolver::new(&url, Duration::from_secs(5)).unwrap();

        let lookup = resolver.resolve("120767").await;

        assert_eq!(lookup, PriceLookup::Found(dec!(190.07)));
    }

    #[tokio::test]
    async fn server_error_is_unavailable() {
        let url = serve_once("500 Internal Server Error", "oops").await;
        let resolver = AmfiNavResolver::new(&url, Duration::from_secs(5)).unwrap();

        let lookup = resolver.resolve("120503").await;

        match lookup {
            PriceLookup::Miss(LookupMiss::Unavailable(reason)) => {
                assert!(reason.contains("500"), "unexpected reason: {}", reason)
            }
            other => panic!("expected an unavailable miss, got {:?}", other),
        }
    }
}
