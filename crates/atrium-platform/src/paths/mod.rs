mod ensure;
mod resolve;

pub use ensure::ensure_dirs;
pub use resolve::{
    cache_dir, config_dir, crash_report_dir, data_dir, log_dir, partitions_dir, profiles_file,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_ends_with_atrium() {
        let path = config_dir().unwrap();
        assert!(path.ends_with("atrium"), "got: {path:?}");
    }

    #[test]
    fn data_dir_ends_with_atrium() {
        let path = data_dir().unwrap();
        assert!(path.ends_with("atrium"), "got: {path:?}");
    }

    #[test]
    fn profiles_file_lives_in_data_dir() {
        let path = profiles_file().unwrap();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), "profiles.json");
        assert!(path.starts_with(data_dir().unwrap()));
    }

    #[test]
    fn partitions_dir_lives_in_data_dir() {
        let path = partitions_dir().unwrap();
        assert!(path.starts_with(data_dir().unwrap()));
        assert!(path.ends_with("partitions"));
    }

    #[test]
    fn crash_report_dir_is_inside_log_dir() {
        let crash = crash_report_dir().unwrap();
        assert!(crash.starts_with(log_dir().unwrap()));
    }
}
