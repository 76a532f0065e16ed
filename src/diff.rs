// src/diff.rs

/// Old-side start line of a hunk header like `@@ -12,3 +12,0 @@`.
pub fn hunk_old_start(header: &str) -> Option<usize> {
    let rest = header.strip_prefix("@@ -")?;
    let end = rest.find(|c: char| c == ',' || c == ' ')?;
    rest[..end].parse().ok()
}

/// Old-side line numbers removed by a zero-context unified diff.
///
/// File header lines before the first hunk are skipped. Within hunks only
/// `-` lines advance the counter, so this is only meaningful for `-U0` diffs.
pub fn removed_lines(diff: &str) -> Vec<usize> {
    let mut removed = Vec::new();
    let mut line_no = 1;

    for line in diff.lines().skip_while(|l| !l.starts_with('@')) {
        match line.as_bytes().first() {
            Some(b'@') => {
                if let Some(start) = hunk_old_start(line) {
                    line_no = start;
                }
            }
            Some(b'-') => {
                removed.push(line_no);
                line_no += 1;
            }
            _ => {}
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hunk_headers() {
        assert_eq!(hunk_old_start("@@ -12,3 +12,0 @@"), Some(12));
        assert_eq!(hunk_old_start("@@ -7 +7 @@ fn main() {"), Some(7));
        assert_eq!(hunk_old_start("@@ -0,0 +1,4 @@"), Some(0));
        assert_eq!(hunk_old_start("diff --git a/x b/x"), None);
    }

    #[test]
    fn removed_lines_across_hunks() {
        let diff = "\
diff --git a/src/Foo.java b/src/Foo.java
index 1111111..2222222 100644
--- a/src/Foo.java
+++ b/src/Foo.java
@@ -3,2 +3 @@ class Foo {
-    int a;
-    int b;
+    int ab;
@@ -10 +9,2 @@ class Foo {
-    return null;
+    if (x == null)
+        return y;
@@ -20,0 +21 @@
+    // trailing
";
        assert_eq!(removed_lines(diff), vec![3, 4, 10]);
    }

    #[test]
    fn header_dashes_are_not_removals() {
        let diff = "\
diff --git a/A.java b/A.java
old mode 100644
new mode 100755
index 1111111..2222222
--- a/A.java
+++ b/A.java
@@ -5 +5 @@
-x
+y
";
        assert_eq!(removed_lines(diff), vec![5]);
    }

    #[test]
    fn additions_only_and_empty() {
        let diff = "\
diff --git a/N.java b/N.java
new file mode 100644
index 0000000..3333333
--- /dev/null
+++ b/N.java
@@ -0,0 +1,2 @@
+class N {
+}
";
        assert!(removed_lines(diff).is_empty());
        assert!(removed_lines("").is_empty());
    }
}
