// SPDX-License-Identifier: MIT

//! System locale detection and the localized message table behind spec
//! §6's "localized" wording: ask-question, idle/permission prompt,
//! turn-complete, summary-failed, and the project-switch announcement.

use ccvr_core::Language;

/// Detect the system locale from the environment, falling back to
/// `Language::English` (spec §6: "if omitted, detect from system locale,
/// falling back to `en`"). Checked in the order glibc/POSIX programs
/// conventionally do: `LC_ALL`, then `LC_MESSAGES`, then `LANG`.
pub fn detect_system_language() -> Language {
    for var in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            let code = value.split('.').next().unwrap_or(&value);
            if !code.is_empty() && !code.eq_ignore_ascii_case("c") && !code.eq_ignore_ascii_case("posix") {
                return Language::from_code(code);
            }
        }
    }
    Language::English
}

/// "`<question>`. Awaiting confirmation" (L4 ask-question).
pub fn ask_question_message(language: Language, question: &str) -> String {
    let suffix = match language {
        Language::Spanish => "Esperando confirmación",
        Language::French => "En attente de confirmation",
        Language::German => "Warte auf Bestätigung",
        Language::Japanese => "確認待ち",
        Language::ChineseSimplified => "等待确认",
        Language::Portuguese => "Aguardando confirmação",
        Language::Russian => "Ожидание подтверждения",
        Language::Korean => "확인 대기 중",
        Language::Italian => "In attesa di conferma",
        Language::English => "Awaiting confirmation",
    };
    format!("{question}. {suffix}")
}

/// Shared text for L2 permission-prompt and L3 idle-prompt.
pub fn permission_required_message(language: Language) -> &'static str {
    match language {
        Language::Spanish => "Se requiere permiso",
        Language::French => "Autorisation requise",
        Language::German => "Berechtigung erforderlich",
        Language::Japanese => "許可が必要です",
        Language::ChineseSimplified => "需要权限",
        Language::Portuguese => "Permissão necessária",
        Language::Russian => "Требуется разрешение",
        Language::Korean => "권한이 필요합니다",
        Language::Italian => "Autorizzazione richiesta",
        Language::English => "permission required",
    }
}

/// L1 turn-complete.
pub fn awaiting_input_message(language: Language) -> &'static str {
    match language {
        Language::Spanish => "esperando entrada",
        Language::French => "en attente de saisie",
        Language::German => "warte auf Eingabe",
        Language::Japanese => "入力待ち",
        Language::ChineseSimplified => "等待输入",
        Language::Portuguese => "aguardando entrada",
        Language::Russian => "ожидание ввода",
        Language::Korean => "입력 대기 중",
        Language::Italian => "in attesa di input",
        Language::English => "awaiting input",
    }
}

/// "summary failed (N events)", spoken when the summarizer's LLM call
/// fails.
pub fn summary_failed_message(language: Language, event_count: usize) -> String {
    match language {
        Language::Spanish => format!("resumen fallido ({event_count} eventos)"),
        Language::French => format!("échec du résumé ({event_count} événements)"),
        Language::German => format!("Zusammenfassung fehlgeschlagen ({event_count} Ereignisse)"),
        Language::Japanese => format!("要約に失敗しました（{event_count}件のイベント）"),
        Language::ChineseSimplified => format!("摘要失败（{event_count} 个事件）"),
        Language::Portuguese => format!("falha no resumo ({event_count} eventos)"),
        Language::Russian => format!("сводка не удалась ({event_count} событий)"),
        Language::Korean => format!("요약 실패 ({event_count}개 이벤트)"),
        Language::Italian => format!("riepilogo non riuscito ({event_count} eventi)"),
        Language::English => format!("summary failed ({event_count} events)"),
    }
}

/// "`<project>` is now playing" — the queue's project-switch announcement.
pub fn project_switch_announcement(language: Language, project_display_name: &str) -> String {
    match language {
        Language::Spanish => format!("{project_display_name} está sonando ahora"),
        Language::French => format!("{project_display_name} est en cours de lecture"),
        Language::German => format!("{project_display_name} läuft jetzt"),
        Language::Japanese => format!("{project_display_name} を再生中です"),
        Language::ChineseSimplified => format!("正在播放 {project_display_name}"),
        Language::Portuguese => format!("{project_display_name} está tocando agora"),
        Language::Russian => format!("сейчас играет {project_display_name}"),
        Language::Korean => format!("{project_display_name}을(를) 재생 중입니다"),
        Language::Italian => format!("{project_display_name} è ora in riproduzione"),
        Language::English => format!("{project_display_name} is now playing"),
    }
}

/// Replace the middle of `message` with `…` so that at most `max_length`
/// characters remain, split evenly between a head and tail half. A
/// `max_length` of 0 disables truncation (spec §4.3).
pub fn truncate_message(message: &str, max_length: usize) -> String {
    if max_length == 0 {
        return message.to_string();
    }
    let chars: Vec<char> = message.chars().collect();
    if chars.len() <= max_length {
        return message.to_string();
    }
    let half = max_length / 2;
    let head: String = chars[..half].iter().collect();
    let tail: String = chars[chars.len() - half..].iter().collect();
    format!("{head}…{tail}")
}

#[cfg(test)]
#[path = "locale_tests.rs"]
mod tests;
