//! Tests for progress tracking across files and colors

#[cfg(test)]
mod tests {
    use bricktile::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use bricktile::io::progress::ProgressManager;
    use std::path::Path;

    // Tests a single file with one color
    // Verified by returning the same handle for every task
    #[test]
    fn test_single_file() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);
        assert_eq!(pm.file_count(), 1);

        let task = pm.start_color(Path::new("art.png"), [255, 0, 0], 257);
        assert_eq!(task, 0);
        pm.update_step(task, 100);
        pm.complete_color(task);
        pm.complete_file();
        pm.finish();
    }

    // Tests more tasks than visible bars
    // Verified by indexing bars past the visible window
    #[test]
    fn test_many_tasks() {
        let mut pm = ProgressManager::default();
        pm.initialize(MAX_INDIVIDUAL_PROGRESS_BARS + 3);

        for index in 0..MAX_INDIVIDUAL_PROGRESS_BARS * 2 {
            let task = pm.start_color(Path::new("batch.png"), [index as u8, 0, 0], 10);
            assert_eq!(task, index);
            pm.update_step(task, 5);
            pm.complete_color(task);
        }
        pm.update_step(0, 1);
        pm.update_step(usize::MAX, 1);
        pm.complete_file();
        pm.finish();
    }

    // Tests that unknown handles are ignored
    // Verified by indexing task states directly
    #[test]
    fn test_unknown_task() {
        let mut pm = ProgressManager::new();
        pm.initialize(0);
        pm.complete_color(3);
        pm.update_step(3, 1);
        pm.println("done");
        pm.finish();
    }
}
