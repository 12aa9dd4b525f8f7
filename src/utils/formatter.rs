// Formatters - 파일 크기, 날짜, 라벨 포맷팅

use chrono::{DateTime, Local};
use std::time::SystemTime;

/// 파일 크기를 읽기 쉬운 형식으로 포맷팅 (숫자와 단위 사이 공백)
///
/// # Examples
/// ```
/// use scangallery::utils::formatter::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 B");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}

/// 스캔 시각 표시용 날짜 ("YYYY-MM-DD HH:MM", 16자 고정)
pub fn format_date(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d %H:%M").to_string()
}

/// 셀 라벨용 파일명 대문자화
///
/// 공백/구분자(`_`, `-`, `.`) 뒤의 첫 글자를 대문자로 바꿉니다. 나머지 글자는 유지합니다.
pub fn capitalize_label(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if at_word_start {
            result.extend(ch.to_uppercase());
        } else {
            result.push(ch);
        }
        at_word_start = ch.is_whitespace() || matches!(ch, '_' | '-' | '.');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(3_670_016), "3.5 MB");
        assert_eq!(format_file_size(2_147_483_648), "2.0 GB");
    }

    #[test]
    fn test_format_date() {
        // 항상 "YYYY-MM-DD HH:MM" 형식 (16자)
        assert_eq!(format_date(SystemTime::now()).len(), 16);
    }

    #[test]
    fn test_capitalize_label() {
        assert_eq!(capitalize_label("receipt.jpg"), "Receipt.Jpg");
        assert_eq!(capitalize_label("tax form_2024"), "Tax Form_2024");
        assert_eq!(capitalize_label("scan-01.png"), "Scan-01.Png");
        assert_eq!(capitalize_label(""), "");
        assert_eq!(capitalize_label("ÉTÉ"), "ÉTÉ");
    }

}
