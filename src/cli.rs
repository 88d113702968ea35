//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复文件与文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复文件与文本。\n每个像素的 R、G、B 通道各隐藏 1 位数据，Alpha 通道保持不变。"
)]
pub struct Cli {
    /// 提高日志详细程度 (-v, -vv, -vvv)，可被 RUST_LOG 覆盖。
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 中隐藏文件内容或一段文本。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的内容。
    Recover(RecoverArgs),

    /// 查询图像可容纳的隐写容量。
    Capacity(CapacityArgs),

    /// 估计图像中存在 LSB 隐写的可能性。
    Detect(DetectArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文件路径，其文件名会一并写入头部。
    #[arg(short, long, conflicts_with = "message", required_unless_present = "message")]
    pub text: Option<PathBuf>,

    /// 直接隐藏的文本内容，以 `message.txt` 作为文件名。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 覆盖写入头部的文件名。
    #[arg(short, long)]
    pub name: Option<String>,

    /// 隐写完成后保存结果图像的路径。默认为输入图像旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复内容的保存路径。默认为图像旁的 `recovered_<隐藏的文件名>`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 要查询的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 以 JSON 格式输出 `{capacity_bits, capacity_bytes}`。
    #[arg(long)]
    pub json: bool,
}

/// 'detect' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// 要分析的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 以 JSON 格式输出检测报告。
    #[arg(long)]
    pub json: bool,
}
