//! Multi-pass collection against mocked hosts.

use hostmetrics::collector::{CollectError, HostCollector, MockFs, MockRunner};
use hostmetrics::storage::Storage;
use hostmetrics::storage::host::{CPU, DISK, LOAD, SWAP};

/// `/proc/stat` 15 seconds after `TYPICAL_STAT`: 300 busy ticks, of which
/// 150 user, 75 system, 60 iowait and 15 steal.
const NEXT_STAT: &str = "cpu  10150 500 3075 81200 1060 200 100 65 0 0\n";

#[test]
fn cpu_rates_appear_on_second_pass() {
    let store = Storage::host(15).unwrap();
    let mut collector = HostCollector::new(MockFs::typical_system(), MockRunner::linux(), "/proc");

    collector.collect_pass(&store).unwrap();
    assert_eq!(store.read(CPU, ""), None);
    assert!(store.contains(CPU, ""));

    collector
        .system_mut()
        .fs_mut()
        .add_file("/proc/stat", NEXT_STAT);
    collector.collect_pass(&store).unwrap();

    assert_eq!(store.read(CPU, "").as_deref(), Some("20%"));
    assert_eq!(store.read(CPU, "user").as_deref(), Some("10%"));
    assert_eq!(store.read(CPU, "system").as_deref(), Some("5%"));
    assert_eq!(store.read(CPU, "iowait").as_deref(), Some("4%"));
    assert_eq!(store.read(CPU, "steal").as_deref(), Some("1%"));
}

#[test]
fn unchanged_counters_read_zero() {
    let store = Storage::host(15).unwrap();
    let mut collector = HostCollector::new(MockFs::typical_system(), MockRunner::linux(), "/proc");

    collector.collect_pass(&store).unwrap();
    collector.collect_pass(&store).unwrap();

    assert_eq!(store.raw_value(CPU, ""), Some(0));
    assert_eq!(store.read(CPU, "").as_deref(), Some("0%"));
}

#[test]
fn disk_family_grows_once_per_mount() {
    let mut fs = MockFs::typical_system();
    fs.add_file(
        "/var/lib/df.out",
        "Filesystem 1K-blocks Used Available Use% Mounted on\n\
         /dev/sda1 1000 530 470 53% /\n\
         /dev/sda2 1000 270 730 27% /home\n",
    );
    let store = Storage::host(15).unwrap();
    let mut collector =
        HostCollector::new(fs, MockRunner::new(), "/proc").with_disk_path("/var/lib/df.out");

    collector.collect_pass(&store).unwrap();
    collector.collect_pass(&store).unwrap();
    assert_eq!(
        store.submetrics(DISK),
        Some(vec!["/".to_string(), "/home".to_string()])
    );
    assert_eq!(store.read(DISK, "/home").as_deref(), Some("27%"));

    // An unmounted filesystem keeps its last reading.
    collector
        .system_mut()
        .fs_mut()
        .add_file("/var/lib/df.out", "/dev/sda1 1000 610 390 61% /\n");
    collector.collect_pass(&store).unwrap();

    assert_eq!(store.read(DISK, "/").as_deref(), Some("61%"));
    assert_eq!(store.read(DISK, "/home").as_deref(), Some("27%"));
    assert_eq!(store.submetrics(DISK).map(|s| s.len()), Some(2));
}

#[test]
fn swap_follows_meminfo_between_passes() {
    let store = Storage::host(15).unwrap();
    let mut collector = HostCollector::new(MockFs::typical_system(), MockRunner::linux(), "/proc");

    collector.collect_pass(&store).unwrap();
    assert_eq!(store.read(SWAP, "").as_deref(), Some("0%"));

    *collector.system_mut().fs_mut() = MockFs::swap_pressure();
    collector.collect_pass(&store).unwrap();
    assert_eq!(store.read(SWAP, "").as_deref(), Some("75%"));

    *collector.system_mut().fs_mut() = MockFs::swap_exhausted();
    collector.collect_pass(&store).unwrap();
    assert_eq!(store.read(SWAP, "").as_deref(), Some("100%"));
}

#[test]
fn failed_pass_keeps_previous_values() {
    let store = Storage::host(15).unwrap();
    let mut collector = HostCollector::new(MockFs::typical_system(), MockRunner::linux(), "/proc");
    collector.collect_pass(&store).unwrap();

    collector
        .system_mut()
        .fs_mut()
        .add_file("/proc/loadavg", "garbage\n");
    let err = collector.collect_pass(&store).unwrap_err();

    assert!(matches!(err, CollectError::Parse(_)));
    assert_eq!(store.read(LOAD, "5").as_deref(), Some("1.20"));
    assert_eq!(store.read(DISK, "/").as_deref(), Some("53%"));
}

#[test]
fn snapshot_serializes_to_json() {
    let store = Storage::host(15).unwrap();
    let mut collector = HostCollector::new(MockFs::typical_system(), MockRunner::linux(), "/proc");
    collector.collect_pass(&store).unwrap();

    let json = serde_json::to_value(store.snapshot()).unwrap();
    let metrics = json["metrics"].as_array().unwrap();
    let load1 = metrics
        .iter()
        .find(|m| m["family"] == "load" && m["submetric"] == "1")
        .unwrap();

    assert_eq!(load1["display"], "0.50");
    assert_eq!(load1["current"], 50);
    assert!(json["taken_at"].is_string());
}

#[test]
fn readers_see_whole_passes() {
    let store = Storage::host(15).unwrap();
    let mut collector = HostCollector::new(MockFs::typical_system(), MockRunner::linux(), "/proc");

    std::thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..50 {
                collector.collect_pass(&store).unwrap();
            }
        });
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..50 {
                    let snapshot = store.snapshot();
                    if let Some(load) = snapshot.get(LOAD, "1") {
                        assert!(load.current.is_none() || load.current == Some(50));
                    }
                }
            });
        }
    });

    assert_eq!(store.raw_value(CPU, ""), Some(0));
}
