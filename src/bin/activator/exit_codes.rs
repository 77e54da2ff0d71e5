pub const SUCCESS: i32 = 0;
/// Transport, decoding or output failure during a run
pub const EXECUTION_ERROR: i32 = 1;
/// Bad arguments or classifier configuration; nothing was processed
pub const INPUT_ERROR: i32 = 2;

pub fn for_error(err: &activation_rs::ActivationError) -> i32 {
    if err.is_config() {
        INPUT_ERROR
    } else {
        EXECUTION_ERROR
    }
}
