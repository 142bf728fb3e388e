use super::parse;
use crate::metrics::Metrics;

const LINUX_OK: &str = "PING nyc3.digitaloceanspaces.com (162.243.189.2) 56(84) bytes of data.\n\
\n\
--- nyc3.digitaloceanspaces.com ping statistics ---\n\
30 packets transmitted, 30 received, 0% packet loss, time 5864ms\n\
rtt min/avg/max/mdev = 20.971/21.672/23.089/0.759 ms\n";

const LINUX_UNREACHABLE: &str = "PING 10.255.255.1 (10.255.255.1) 56(84) bytes of data.\n\
\n\
--- 10.255.255.1 ping statistics ---\n\
10 packets transmitted, 0 received, +10 errors, 100% packet loss, time 9012ms\n";

const MACOS_OK: &str = "PING example.com (93.184.216.34): 56 data bytes\n\
\n\
--- example.com ping statistics ---\n\
10 packets transmitted, 10 packets received, 0.0% packet loss\n\
round-trip min/avg/max/stddev = 14.104/15.230/16.300/0.912 ms\n";

const BUSYBOX_OK: &str = "--- 192.168.1.1 ping statistics ---\n\
4 packets transmitted, 4 packets received, 0% packet loss\n\
round-trip min/avg/max = 1.234/2.345/3.456 ms\n";

const WINDOWS_EN: &str = "Pinging 1.2.3.4 with 32 bytes of data:\r\n\
Reply from 1.2.3.4: bytes=32 time=11ms TTL=56\r\n\
\r\n\
Ping statistics for 1.2.3.4:\r\n    \
Packets: Sent = 4, Received = 4, Lost = 0 (0% loss),\r\n\
Approximate round trip times in milli-seconds:\r\n    \
Minimum = 11ms, Maximum = 49ms, Average = 25ms\r\n";

const WINDOWS_ZH: &str = "正在 Ping 1.2.3.4 具有 32 字节的数据:\r\n\
\r\n\
1.2.3.4 的 Ping 统计信息:\r\n    \
数据包: 已发送 = 4，已接收 = 3，丢失 = 1 (25% 丢失)，\r\n\
往返行程的估计时间(以毫秒为单位):\r\n    \
最短 = 30ms，最长 = 35ms，平均 = 32ms\r\n";

#[test]
fn parses_synthetic_posix_summary() {
    let raw = "30 packets transmitted, 30 received, 0% packet loss\n\
               rtt min/avg/max/mdev = 10.0/12.5/15.0/1.2 ms";
    let metrics = parse(raw);
    assert_eq!(
        metrics,
        Metrics {
            sent: Some(30),
            received: Some(30),
            loss_percent: Some(0.0),
            min_ms: Some(10.0),
            avg_ms: Some(12.5),
            max_ms: Some(15.0),
            jitter_ms: Some(1.2),
        }
    );
}

#[test]
fn parses_linux_iputils_output() {
    let metrics = parse(LINUX_OK);
    assert_eq!(metrics.sent, Some(30));
    assert_eq!(metrics.received, Some(30));
    assert_eq!(metrics.loss_percent, Some(0.0));
    assert_eq!(metrics.min_ms, Some(20.971));
    assert_eq!(metrics.avg_ms, Some(21.672));
    assert_eq!(metrics.max_ms, Some(23.089));
    assert_eq!(metrics.jitter_ms, Some(0.759));
}

#[test]
fn total_loss_has_no_rtt_fields() {
    let metrics = parse("10 packets transmitted, 0 received, 100% packet loss");
    assert_eq!(metrics.sent, Some(10));
    assert_eq!(metrics.received, Some(0));
    assert_eq!(metrics.loss_percent, Some(100.0));
    assert!(metrics.min_ms.is_none());
    assert!(metrics.avg_ms.is_none());
    assert!(metrics.max_ms.is_none());
    assert!(metrics.jitter_ms.is_none());
    assert_eq!(metrics.sort_key(), f64::INFINITY);
}

#[test]
fn parses_unreachable_output_with_error_counter() {
    let metrics = parse(LINUX_UNREACHABLE);
    assert_eq!(metrics.sent, Some(10));
    assert_eq!(metrics.received, Some(0));
    assert_eq!(metrics.loss_percent, Some(100.0));
    assert!(metrics.avg_ms.is_none());
}

#[test]
fn parses_macos_round_trip_stddev() {
    let metrics = parse(MACOS_OK);
    assert_eq!(metrics.sent, Some(10));
    assert_eq!(metrics.received, Some(10));
    assert_eq!(metrics.loss_percent, Some(0.0));
    assert_eq!(metrics.min_ms, Some(14.104));
    assert_eq!(metrics.avg_ms, Some(15.23));
    assert_eq!(metrics.max_ms, Some(16.3));
    assert_eq!(metrics.jitter_ms, Some(0.912));
}

#[test]
fn parses_busybox_without_jitter() {
    let metrics = parse(BUSYBOX_OK);
    assert_eq!(metrics.sent, Some(4));
    assert_eq!(metrics.min_ms, Some(1.234));
    assert_eq!(metrics.avg_ms, Some(2.345));
    assert_eq!(metrics.max_ms, Some(3.456));
    assert!(metrics.jitter_ms.is_none());
}

#[test]
fn parses_windows_english_by_label() {
    let raw = "Packets: Sent = 4, Received = 4, Lost = 0 (0% loss)\n\
               Minimum = 11ms, Maximum = 49ms, Average = 25ms";
    let metrics = parse(raw);
    assert_eq!(
        metrics,
        Metrics {
            sent: Some(4),
            received: Some(4),
            loss_percent: Some(0.0),
            min_ms: Some(11.0),
            avg_ms: Some(25.0),
            max_ms: Some(49.0),
            jitter_ms: None,
        }
    );
}

#[test]
fn parses_windows_english_with_crlf() {
    let metrics = parse(WINDOWS_EN);
    assert_eq!(metrics.sent, Some(4));
    assert_eq!(metrics.received, Some(4));
    assert_eq!(metrics.loss_percent, Some(0.0));
    assert_eq!(metrics.min_ms, Some(11.0));
    assert_eq!(metrics.max_ms, Some(49.0));
    assert_eq!(metrics.avg_ms, Some(25.0));
}

#[test]
fn parses_windows_chinese() {
    let metrics = parse(WINDOWS_ZH);
    assert_eq!(metrics.sent, Some(4));
    assert_eq!(metrics.received, Some(3));
    assert_eq!(metrics.loss_percent, Some(25.0));
    assert_eq!(metrics.min_ms, Some(30.0));
    assert_eq!(metrics.max_ms, Some(35.0));
    assert_eq!(metrics.avg_ms, Some(32.0));
    assert!(metrics.jitter_ms.is_none());
}

#[test]
fn earlier_packet_grammar_wins() {
    let raw = "Packets: Sent = 9, Received = 1, Lost = 8 (88% loss)\n\
               4 packets transmitted, 4 received, 0% packet loss";
    let metrics = parse(raw);
    assert_eq!(metrics.sent, Some(4));
    assert_eq!(metrics.loss_percent, Some(0.0));
}

#[test]
fn field_groups_are_independent() {
    let raw = "Packets: Sent = 4, Received = 2, Lost = 2 (50% loss)\n\
               rtt min/avg/max/mdev = 1.0/2.0/3.0/0.5 ms";
    let metrics = parse(raw);
    assert_eq!(metrics.loss_percent, Some(50.0));
    assert_eq!(metrics.avg_ms, Some(2.0));
    assert_eq!(metrics.jitter_ms, Some(0.5));
}

#[test]
fn rtt_without_packet_summary_keeps_loss_absent() {
    let metrics = parse("round-trip min/avg/max/stddev = 5.0/6.0/7.0/0.1 ms");
    assert!(metrics.loss_percent.is_none());
    assert_eq!(metrics.avg_ms, Some(6.0));
}

#[test]
fn inconsistent_counts_are_rejected() {
    let metrics = parse("5 packets transmitted, 9 received, 0% packet loss");
    assert!(metrics.sent.is_none());
    assert!(metrics.received.is_none());
    assert!(metrics.loss_percent.is_none());
}

#[test]
fn loss_above_hundred_is_rejected() {
    let metrics = parse("5 packets transmitted, 0 received, 150% packet loss");
    assert!(metrics.loss_percent.is_none());
}

#[test]
fn unparseable_input_is_absent() {
    for raw in [
        "",
        "   \n\r\n",
        "ping: unknown host nowhere.invalid",
        "garbage \u{0}\u{7f} ===/// ms",
        "rtt min/avg/max/mdev = a/b/c/d ms",
    ] {
        assert!(parse(raw).is_absent(), "expected absent metrics for {raw:?}");
    }
}

#[test]
fn localized_digits_are_not_parsed() {
    let raw = "١٠ packets transmitted, ١٠ received, ٠% packet loss";
    assert!(parse(raw).is_absent());
}

#[test]
fn thousands_separators_are_not_parsed() {
    let metrics = parse("1,000 packets transmitted, 1,000 received, 0% packet loss");
    assert!(metrics.sent.is_none());
}

#[test]
fn counter_overflow_is_absent() {
    let metrics = parse("99999999999 packets transmitted, 1 received, 0% packet loss");
    assert!(metrics.sent.is_none());
}

#[test]
fn total_loss_with_stray_rtt_ranks_after_partial_loss() {
    use crate::config::Target;
    use crate::ranking::rank;
    use std::collections::BTreeMap;

    let dead = "4 packets transmitted, 0 received, 100% packet loss, time 3004ms\n\
                rtt min/avg/max/mdev = 1.000/1.000/1.000/0.000 ms";
    let flaky = "4 packets transmitted, 1 received, 75% packet loss, time 3004ms\n\
                 rtt min/avg/max/mdev = 400.000/400.000/400.000/0.000 ms";

    let dead_metrics = parse(dead);
    assert_eq!(dead_metrics.loss_percent, Some(100.0));
    assert_eq!(dead_metrics.avg_ms, Some(1.0));

    let catalog = vec![
        Target::new("Region", "Sub", "Dead", "dead.example.com"),
        Target::new("Region", "Sub", "Flaky", "flaky.example.com"),
    ];
    let results = BTreeMap::from([
        ("dead.example.com".to_string(), dead_metrics),
        ("flaky.example.com".to_string(), parse(flaky)),
    ]);

    let rows = rank(&results, &catalog);
    assert_eq!(rows[0].target.host, "flaky.example.com");
    assert_eq!(rows[0].sort_key, 400.0);
    assert_eq!(rows[1].target.host, "dead.example.com");
    assert!(!rows[1].is_usable());
}
