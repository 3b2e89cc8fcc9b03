//! Pre-built host scenarios for testing.
//!
//! `MockFs` scenarios describe a Linux-like `/proc`; `MockRunner` scenarios
//! provide the tool output seen on hosts without one.

use super::filesystem::MockFs;
use super::runner::MockRunner;

/// First line of `/proc/stat` in [`MockFs::typical_system`].
///
/// Busy ticks (everything but idle) sum to 14850.
pub const TYPICAL_STAT: &str = "cpu  10000 500 3000 80000 1000 200 100 50 0 0\n";

const TYPICAL_MEMINFO: &str = "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
Dirty:              1024 kB
";

impl MockFs {
    /// Creates an idle Linux host with untouched swap.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file("/proc/loadavg", "0.50 1.20 2.35 1/150 1234\n");
        fs.add_file("/proc/meminfo", TYPICAL_MEMINFO);
        fs.add_file(
            "/proc/stat",
            format!(
                "{}cpu0 2500 125 750 20000 250 50 25 12 0 0\nctxt 500000\nbtime 1700000000\n",
                TYPICAL_STAT
            ),
        );

        fs
    }

    /// Creates a host with a quarter of its swap left.
    pub fn swap_pressure() -> Self {
        let mut fs = Self::typical_system();
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:          256000 kB
MemAvailable:     512000 kB
SwapTotal:       4096000 kB
SwapFree:        1024000 kB
",
        );
        fs
    }

    /// Creates a host whose swap is completely used.
    pub fn swap_exhausted() -> Self {
        let mut fs = Self::typical_system();
        fs.add_file(
            "/proc/meminfo",
            "MemTotal:       16384000 kB\nSwapTotal:       4096000 kB\nSwapFree:              0 kB\n",
        );
        fs
    }

    /// Creates a host whose `/proc/meminfo` has lines in unexpected formats.
    pub fn garbled_meminfo() -> Self {
        let mut fs = Self::typical_system();
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
this line is not a key value pair
HugePages_Rsvd:  n/a
SwapTotal:       2000000 kB
SwapFree:        1500000 kB
",
        );
        fs
    }
}

/// `df` output on a Linux host.
pub const LINUX_DF: &str = "\
Filesystem     1K-blocks      Used Available Use% Mounted on
udev             8123456         0   8123456   0% /dev
tmpfs            1628000      2100   1625900   1% /run
/dev/sda1      102687672  51343836  46088572  53% /
/dev/sda2      515928320 128982080 360716240  27% /home
";

/// `df` output on a macOS host.
pub const DARWIN_DF: &str = "\
Filesystem     512-blocks      Used Available Capacity iused      ifree %iused  Mounted on
/dev/disk3s1s1  965595304  19152808 493577760     4%  403755 2467888800    0%   /
devfs                 401       401         0   100%     694          0  100%   /dev
/dev/disk3s6    965595304   2097192 493577760     1%       1 2467888800    0%   /System/Volumes/VM
map auto_home           0         0         0   100%       0          0     -   /System/Volumes/Data/home
";

impl MockRunner {
    /// Tools of a Linux host; only `df` is consulted there.
    pub fn linux() -> Self {
        let mut runner = Self::new();
        runner.add_output("df", LINUX_DF);
        runner
    }

    /// Tools of a macOS host, which has no `/proc`.
    pub fn darwin() -> Self {
        let mut runner = Self::new();
        runner.add_output("sysctl -n vm.loadavg", "{ 1.64 1.85 1.93 }\n");
        runner.add_output(
            "sysctl -n vm.swapusage",
            "total = 4096.00M  used = 2048.00M  free = 2048.00M  (encrypted)\n",
        );
        runner.add_output("df", DARWIN_DF);
        runner
    }
}
