use anyhow::{Context, Result};
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One output row, headers exactly as the dashboard expects them.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "Device")]
    device: String,
    #[serde(rename = "Traffic")]
    traffic: String,
    #[serde(rename = "RSSI_avg(dBm)")]
    rssi: f64,
    #[serde(rename = "Jitter")]
    jitter: String,
    #[serde(rename = "Throughput(iperf)")]
    throughput: f64,
    #[serde(rename = "Retry_perc(iperf)")]
    app_retry: f64,
    #[serde(rename = "TXOP_retry_rate")]
    mac_retry: f64,
    #[serde(rename = "R0_Max_MCS")]
    mcs_initial: i64,
    #[serde(rename = "R1_Max_MCS")]
    mcs_retry: i64,
    sgi: u32,
    lgi: u32,
    #[serde(rename = "Most_MSDU_per_TXOP")]
    most_msdu: u32,
    #[serde(rename = "Most_AMPDU_per_TXOP")]
    most_ampdu: u32,
    #[serde(rename = "Mgnt_overheads")]
    mgmt: f64,
    #[serde(rename = "Ctrl Overheads")]
    ctrl: f64,
    data0: f64,
    data1: f64,
    #[serde(rename = "Unrelated")]
    unrelated: f64,
    #[serde(rename = "Other_BSS")]
    other_bss: f64,
    #[serde(rename = "Idle")]
    idle: f64,
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn generate_row(rng: &mut SimpleRng, device: &str, traffic: &str, distance: f64) -> Row {
    let rssi = round1(rng.gauss(-40.0 - distance * 8.0, 4.0));
    // Weaker signal: lower MCS, more retries, less throughput.
    let quality = ((rssi + 90.0) / 50.0).clamp(0.0, 1.0);
    let mcs_initial = (1.0 + quality * 7.0 + rng.gauss(0.0, 0.6)).round().clamp(0.0, 9.0) as i64;
    let mcs_retry = (mcs_initial - 1 - (rng.next_u64() % 2) as i64).max(1);
    let app_retry = round1((12.0 * (1.0 - quality) + rng.gauss(0.0, 1.5)).max(0.0));
    let mac_retry = round1((app_retry * 1.4 + rng.gauss(0.0, 2.0)).max(0.0));
    let throughput = round1((95.0 * quality + rng.gauss(0.0, 5.0)).max(0.5));

    let jitter_ms = (0.5 + 8.0 * (1.0 - quality) + rng.gauss(0.0, 1.0)).max(0.1);
    // A few cells arrive unparseable, as in field captures.
    let jitter = if rng.next_f64() < 0.03 {
        "n/a".to_string()
    } else {
        format!("{:.2}ms", jitter_ms)
    };

    let busy = 0.35 + 0.5 * quality;
    let data = busy * 100.0 * (0.8 + rng.next_f64() * 0.1);
    let mgmt = round1(2.0 + rng.next_f64() * 3.0);
    let ctrl = round1(3.0 + rng.next_f64() * 4.0);
    let data0 = round1(data * 0.7);
    let data1 = round1(data * 0.3);
    let unrelated = round1(rng.next_f64() * 5.0);
    let other_bss = round1(rng.next_f64() * 8.0);
    let idle = round1((100.0 - mgmt - ctrl - data0 - data1 - unrelated - other_bss).max(0.0));

    let sgi = (rng.next_u64() % 20) as u32;
    Row {
        device: device.to_string(),
        traffic: traffic.to_string(),
        rssi,
        jitter,
        throughput,
        app_retry,
        mac_retry,
        mcs_initial,
        mcs_retry,
        sgi,
        lgi: 20 - sgi,
        most_msdu: *rng.pick(&[1, 2, 2, 4]),
        most_ampdu: *rng.pick(&[8, 16, 32, 32, 64]),
        mgmt,
        ctrl,
        data0,
        data1,
        unrelated,
        other_bss,
        idle,
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // Mixed casing on purpose: the loader normalizes it.
    let devices = ["Laptop", "phone", "PHONE", "tablet"];
    let traffic = ["udp", "TCP", "Tcp"];
    let distances = [0.5, 1.5, 2.5, 3.5, 4.5];

    let output_path = "all_data_timing_edited.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;

    let mut rows = 0usize;
    for device in &devices {
        for t in &traffic {
            for &distance in &distances {
                for _ in 0..4 {
                    writer
                        .serialize(generate_row(&mut rng, device, t, distance))
                        .context("writing row")?;
                    rows += 1;
                }
            }
        }
    }
    writer.flush().context("flushing output file")?;

    println!("Wrote {rows} measurement rows to {output_path}");
    Ok(())
}
