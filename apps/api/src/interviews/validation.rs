/// Client-side upload rules enforced again at the API boundary: file type
/// allow-list, size ceiling, required text fields, and the consent flag for
/// audio uploads.

const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "wav", "m4a", "mp4"];
const TEXT_EXTENSIONS: [&str; 1] = ["txt"];

pub fn file_extension(file_name: &str) -> Option<String> {
    let ext = file_name.rsplit_once('.')?.1;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub fn is_audio_file(file_name: &str) -> bool {
    file_extension(file_name)
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

pub fn is_allowed_file(file_name: &str) -> bool {
    file_extension(file_name)
        .map(|ext| {
            AUDIO_EXTENSIONS.contains(&ext.as_str()) || TEXT_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Validates the metadata for a new interview record. Returns the first
/// violation as a user-facing message.
pub fn validate_new_interview(
    candidate_name: &str,
    position_title: &str,
    file_name: &str,
    file_size: Option<i64>,
    consent_obtained: bool,
    max_upload_bytes: i64,
) -> Result<(), String> {
    if candidate_name.trim().is_empty() {
        return Err("candidateName is required".to_string());
    }
    if position_title.trim().is_empty() {
        return Err("positionTitle is required".to_string());
    }
    if !is_allowed_file(file_name) {
        return Err(format!(
            "Unsupported file type: {file_name}. Allowed: mp3, wav, m4a, mp4, txt"
        ));
    }
    if let Some(size) = file_size {
        if size <= 0 {
            return Err("fileSize must be positive".to_string());
        }
        if size > max_upload_bytes {
            return Err(format!(
                "File exceeds the {max_upload_bytes} byte upload limit"
            ));
        }
    }
    if is_audio_file(file_name) && !consent_obtained {
        return Err("Recording consent is required for audio uploads".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: i64 = 26_214_400;

    #[test]
    fn classifies_extensions() {
        assert!(is_audio_file("call.mp3"));
        assert!(is_audio_file("CALL.WAV"));
        assert!(!is_audio_file("transcript.txt"));
        assert!(is_allowed_file("transcript.txt"));
        assert!(!is_allowed_file("resume.pdf"));
        assert!(!is_allowed_file("noextension"));
        assert!(!is_allowed_file("trailingdot."));
    }

    #[test]
    fn accepts_valid_text_upload() {
        assert!(
            validate_new_interview("Jane Doe", "Engineer", "transcript.txt", Some(1024), false, MAX)
                .is_ok()
        );
    }

    #[test]
    fn requires_candidate_and_position() {
        assert!(validate_new_interview("  ", "Engineer", "a.txt", None, false, MAX).is_err());
        assert!(validate_new_interview("Jane", "", "a.txt", None, false, MAX).is_err());
    }

    #[test]
    fn audio_requires_consent() {
        assert!(validate_new_interview("Jane", "Engineer", "a.mp3", None, false, MAX).is_err());
        assert!(validate_new_interview("Jane", "Engineer", "a.mp3", None, true, MAX).is_ok());
    }

    #[test]
    fn enforces_size_ceiling() {
        assert!(validate_new_interview("Jane", "Engineer", "a.txt", Some(MAX + 1), false, MAX).is_err());
        assert!(validate_new_interview("Jane", "Engineer", "a.txt", Some(MAX), false, MAX).is_ok());
        assert!(validate_new_interview("Jane", "Engineer", "a.txt", Some(0), false, MAX).is_err());
    }
}
