use regex::{Captures, Regex};
use std::sync::LazyLock;

const INT: &str = "[0-9]+";
const NUM: &str = r"[0-9]+(?:\.[0-9]+)?";

/// One textual summary format, expressed as a regex with named groups.
///
/// Packet grammars capture `sent`, `received` and `loss`; RTT grammars
/// capture `min`, `avg`, `max` and optionally `jitter`. Extraction is by
/// group name, so grammars are free to order their fields however the
/// probe tool prints them.
pub(super) struct Grammar {
    pub(super) name: &'static str,
    pattern: Regex,
}

impl Grammar {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("summary grammar must compile"),
        }
    }

    pub(super) fn packet_stats(&self, raw: &str) -> Option<PacketStats> {
        let caps = self.pattern.captures(raw)?;
        let stats = PacketStats {
            sent: capture(&caps, "sent")?,
            received: capture(&caps, "received")?,
            loss_percent: capture(&caps, "loss")?,
        };
        stats.is_consistent().then_some(stats)
    }

    pub(super) fn rtt_stats(&self, raw: &str) -> Option<RttStats> {
        let caps = self.pattern.captures(raw)?;
        let jitter_ms = match caps.name("jitter") {
            Some(value) => Some(value.as_str().parse().ok()?),
            None => None,
        };
        let stats = RttStats {
            min_ms: capture(&caps, "min")?,
            avg_ms: capture(&caps, "avg")?,
            max_ms: capture(&caps, "max")?,
            jitter_ms,
        };
        stats.is_consistent().then_some(stats)
    }
}

fn capture<T: std::str::FromStr>(caps: &Captures<'_>, name: &str) -> Option<T> {
    caps.name(name)?.as_str().parse().ok()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct PacketStats {
    pub(super) sent: u32,
    pub(super) received: u32,
    pub(super) loss_percent: f64,
}

impl PacketStats {
    fn is_consistent(&self) -> bool {
        self.received <= self.sent && (0.0..=100.0).contains(&self.loss_percent)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct RttStats {
    pub(super) min_ms: f64,
    pub(super) avg_ms: f64,
    pub(super) max_ms: f64,
    pub(super) jitter_ms: Option<f64>,
}

impl RttStats {
    fn is_consistent(&self) -> bool {
        [Some(self.min_ms), Some(self.avg_ms), Some(self.max_ms), self.jitter_ms]
            .into_iter()
            .flatten()
            .all(|value| value.is_finite() && value >= 0.0)
    }
}

pub(super) static PACKET_GRAMMARS: LazyLock<Vec<Grammar>> = LazyLock::new(|| {
    vec![
        // iputils / BSD: "10 packets transmitted, 9 [packets ]received, [+1 errors, ]10% packet loss"
        Grammar::new(
            "posix",
            &format!(
                r"(?P<sent>{INT})\s+packets\s+transmitted,\s+(?P<received>{INT})\s+(?:packets\s+)?received,(?:\s*\+{INT}\s+[a-z]+,)*\s+(?P<loss>{NUM})%\s+packet\s+loss"
            ),
        ),
        Grammar::new(
            "windows_en",
            &format!(
                r"(?i)Packets:\s*Sent\s*=\s*(?P<sent>{INT}),\s*Received\s*=\s*(?P<received>{INT}),\s*Lost\s*=\s*{INT}\s*\((?P<loss>{NUM})%\s*loss\)"
            ),
        ),
        Grammar::new(
            "windows_zh",
            &format!(
                r"(?s)数据包[:：].*?已发送\s*=\s*(?P<sent>{INT}).*?已接收\s*=\s*(?P<received>{INT}).*?丢失\s*=\s*{INT}\s*[(（](?P<loss>{NUM})%"
            ),
        ),
    ]
});

pub(super) static RTT_GRAMMARS: LazyLock<Vec<Grammar>> = LazyLock::new(|| {
    vec![
        Grammar::new(
            "posix_labeled",
            &format!(
                r"(?:rtt|round-trip)\s+min/avg/max/(?:mdev|stddev)\s*=\s*(?P<min>{NUM})/(?P<avg>{NUM})/(?P<max>{NUM})/(?P<jitter>{NUM})\s*ms"
            ),
        ),
        Grammar::new(
            "posix_bare",
            &format!(
                r"=\s*(?P<min>{NUM})/(?P<avg>{NUM})/(?P<max>{NUM})/(?P<jitter>{NUM})\s*ms"
            ),
        ),
        // busybox omits the deviation column
        Grammar::new(
            "busybox",
            &format!(
                r"round-trip\s+min/avg/max\s*=\s*(?P<min>{NUM})/(?P<avg>{NUM})/(?P<max>{NUM})\s*ms"
            ),
        ),
        Grammar::new(
            "windows_en",
            &format!(
                r"(?i)Minimum\s*=\s*(?P<min>{INT})\s*ms,\s*Maximum\s*=\s*(?P<max>{INT})\s*ms,\s*Average\s*=\s*(?P<avg>{INT})\s*ms"
            ),
        ),
        Grammar::new(
            "windows_zh",
            &format!(
                r"(?s)最短\s*=\s*(?P<min>{INT})\s*ms.*?最长\s*=\s*(?P<max>{INT})\s*ms.*?平均\s*=\s*(?P<avg>{INT})\s*ms"
            ),
        ),
    ]
});
