//! # 命令处理逻辑模块
//!
//! 包含处理各个子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, DetectArgs, HideArgs, RecoverArgs};
use crate::constants::{
    DEFAULT_PAYLOAD_NAME, HIDDEN_IMAGE_PREFIX, RECOVERED_PREFIX, TEXT_PAYLOAD_NAME,
};
use crate::cover::CoverImage;
use crate::error::StegoError;
use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

fn open_cover(path: &Path) -> Result<CoverImage> {
    CoverImage::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 目标文件已存在时，除非指定了 `--force`，否则拒绝覆盖。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    if path.exists() {
        anyhow::ensure!(
            force,
            "Output file already exists: {}. \nUse --force to overwrite it.",
            path.to_string_lossy().red().bold()
        );
        warn!("overwriting existing file {}", path.display());
    }
    Ok(())
}

fn sibling(path: &Path, file_name: String) -> PathBuf {
    path.parent().unwrap_or(Path::new("")).join(file_name)
}

/// 默认的隐写结果路径：输入图像旁的 `doctored_<名称>.png`。
/// 总是使用 PNG 以保证无损。
pub fn default_hidden_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    sibling(image, format!("{HIDDEN_IMAGE_PREFIX}{stem}.png"))
}

/// 默认的恢复路径：图像旁的 `recovered_<隐藏的文件名>`。
///
/// 只取隐藏文件名的最后一个路径组件，避免写到图像目录之外；
/// 文件名为空或不可用时使用 `payload.bin`。
pub fn default_recovered_path(image: &Path, embedded_name: &str) -> PathBuf {
    let name = Path::new(embedded_name)
        .file_name()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_PAYLOAD_NAME);
    sibling(image, format!("{RECOVERED_PREFIX}{name}"))
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像与待隐藏内容、调用编码器写入头部和载荷，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或待隐藏的文件。
/// * 图像没有足够的空间来隐藏内容。
/// * 文件名过长或图像为空。
/// * 目标文件已存在且未指定 `--force`，或无法写入。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let mut picture = open_cover(&args.image)?;

    let (payload, default_name) = match (&args.text, &args.message) {
        (Some(path), _) => {
            let payload = fs::read(path).with_context(|| {
                format!(
                    "Unable to read payload file: {}",
                    path.to_string_lossy().red().bold()
                )
            })?;
            let name = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            (payload, name)
        }
        (None, Some(message)) => (message.as_bytes().to_vec(), TEXT_PAYLOAD_NAME.to_string()),
        (None, None) => anyhow::bail!("Nothing to hide: pass --text <FILE> or --message <TEXT>."),
    };
    let name = args.name.unwrap_or(default_name);

    let dest = args
        .dest
        .unwrap_or_else(|| default_hidden_path(&args.image));
    ensure_writable(&dest, args.force)?;

    let report = match picture.encode(&payload, Some(&name)) {
        Ok(report) => report,
        Err(StegoError::CapacityExceeded {
            required_bits,
            available_bits,
        }) => anyhow::bail!(
            "Not enough space in the image to hide the payload. \nRequired: {} bits, Available: {} bits",
            required_bits.to_string().red().bold(),
            available_bits.to_string().green().bold()
        ),
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "Failed to hide {} in the image.",
                    name.red().bold()
                )
            });
        }
    };
    info!(
        "embedded {} bytes as '{}' ({} of {} bits used)",
        payload.len(),
        name,
        report.used_bits,
        report.capacity_bits
    );

    picture.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}. \nOnly lossless formats (PNG, BMP, TIFF, WebP, QOI) are supported.",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The payload has been successfully hidden and saved: {} ({:.1}% of capacity used)",
        dest.to_string_lossy().green().bold(),
        report.utilization * 100.0
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用解码器取回载荷与文件名，
/// 最后将载荷写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 图像中没有可识别的隐藏数据，或头部已损坏。
/// * 目标文件已存在且未指定 `--force`，或无法写入。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let picture = open_cover(&args.image)?;

    let decoded = match picture.decode() {
        Ok(decoded) => decoded,
        Err(e) if e.is_not_stego() => {
            debug!("{e}");
            anyhow::bail!(
                "No hidden payload found in '{}'. \nThe image may not contain a hidden payload or is corrupted.",
                args.image.to_string_lossy().red().bold()
            );
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "Failed to recover hidden data from '{}'.",
                    args.image.to_string_lossy().red().bold()
                )
            });
        }
    };
    info!(
        "recovered {} bytes, embedded name '{}'",
        decoded.payload.len(),
        decoded.filename
    );

    let dest = args
        .text
        .unwrap_or_else(|| default_recovered_path(&args.image, &decoded.filename));
    ensure_writable(&dest, args.force)?;

    fs::write(&dest, &decoded.payload).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The payload has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令：报告图像可容纳的位数与字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let picture = open_cover(&args.image)?;
    let capacity = picture.capacity();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&capacity)?);
        return Ok(());
    }

    let (width, height) = picture.dimensions();
    println!(
        "{}: {}x{} pixels",
        args.image.to_string_lossy().bold(),
        width,
        height
    );
    println!(
        "Capacity: {} bits ({} bytes)",
        capacity.capacity_bits.to_string().green().bold(),
        capacity.capacity_bytes.to_string().green().bold()
    );
    println!(
        "Largest text message: {} bytes",
        capacity.max_payload(TEXT_PAYLOAD_NAME).to_string().green()
    );
    Ok(())
}

/// 处理 'Detect' 命令：输出启发式的 LSB 隐写嫌疑分数。
pub fn handle_detect(args: DetectArgs) -> Result<()> {
    let picture = open_cover(&args.image)?;
    let report = picture.detect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let score = format!("{:.3}", report.suspicion_score);
    let score = if report.suspicion_score >= 0.5 {
        score.red().bold()
    } else {
        score.green().bold()
    };
    println!("Suspicion score: {score} (0 = unlikely, 1 = very likely)");
    println!(
        "LSB ones/zeros: {}/{} (balance {:.4}), flip rate {:.4}",
        report.lsb_ones, report.lsb_zeros, report.lsb_balance, report.flip_rate
    );
    println!(
        "{}",
        "Heuristic only: a high score suggests possible LSB embedding but is not definitive.".dimmed()
    );
    Ok(())
}
