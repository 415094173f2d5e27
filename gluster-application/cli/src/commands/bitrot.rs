//! 位腐败检测命令

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use gluster_cluster::{BitrotOption, ScrubControl, ScrubFrequency, ScrubThrottle};

use crate::config::CliConfig;
use crate::BitrotAction;

/// 扫描强度
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThrottleArg {
    Lazy,
    Normal,
    Aggressive,
}

/// 扫描频率
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FrequencyArg {
    Hourly,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

/// 扫描控制
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScrubArg {
    Pause,
    Resume,
}

impl From<ThrottleArg> for BitrotOption {
    fn from(arg: ThrottleArg) -> Self {
        BitrotOption::ScrubThrottle(match arg {
            ThrottleArg::Lazy => ScrubThrottle::Lazy,
            ThrottleArg::Normal => ScrubThrottle::Normal,
            ThrottleArg::Aggressive => ScrubThrottle::Aggressive,
        })
    }
}

impl From<FrequencyArg> for BitrotOption {
    fn from(arg: FrequencyArg) -> Self {
        BitrotOption::ScrubFrequency(match arg {
            FrequencyArg::Hourly => ScrubFrequency::Hourly,
            FrequencyArg::Daily => ScrubFrequency::Daily,
            FrequencyArg::Weekly => ScrubFrequency::Weekly,
            FrequencyArg::Biweekly => ScrubFrequency::Biweekly,
            FrequencyArg::Monthly => ScrubFrequency::Monthly,
        })
    }
}

impl From<ScrubArg> for BitrotOption {
    fn from(arg: ScrubArg) -> Self {
        BitrotOption::Scrub(match arg {
            ScrubArg::Pause => ScrubControl::Pause,
            ScrubArg::Resume => ScrubControl::Resume,
        })
    }
}

pub async fn handle(action: BitrotAction, config: &CliConfig) -> Result<()> {
    let volumes = config.client().volumes();

    let (name, option) = match action {
        BitrotAction::Enable { name } => {
            volumes.enable_bitrot(&name).await?;
            println!("{} 卷 {} 已开启位腐败检测", "✓".green().bold(), name.cyan().bold());
            return Ok(());
        }
        BitrotAction::Disable { name } => {
            volumes.disable_bitrot(&name).await?;
            println!("{} 卷 {} 已关闭位腐败检测", "✓".green().bold(), name.cyan().bold());
            return Ok(());
        }
        BitrotAction::Throttle { name, level } => (name, BitrotOption::from(level)),
        BitrotAction::Frequency { name, every } => (name, BitrotOption::from(every)),
        BitrotAction::Scrub { name, control } => (name, BitrotOption::from(control)),
    };

    volumes.set_bitrot_option(&name, option).await?;
    let (key, value) = option.wire_pair();
    println!(
        "{} 卷 {} {} = {}",
        "✓".green().bold(),
        name.cyan().bold(),
        key,
        value.yellow()
    );
    Ok(())
}
