//! services/api/src/adapters/seed.rs
//!
//! Sample records inserted into an empty database so a fresh install has
//! something to browse.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use prep_tracker_core::domain::{CodeSnippetDraft, Difficulty, QuestionDraft};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

/// Sample questions paired with fixed creation times.
pub fn sample_questions() -> Vec<(QuestionDraft, DateTime<Utc>)> {
    vec![
        (
            QuestionDraft {
                title: "Two Sum".to_string(),
                description: "Given an array of integers nums and an integer target, return indices of the two numbers such that they add up to target.".to_string(),
                link: Some("https://leetcode.com/problems/two-sum/".to_string()),
                category: Some("Algorithm".to_string()),
                difficulty: Some(Difficulty::Easy),
                platform: "LeetCode".to_string(),
                date_solved: NaiveDate::from_ymd_opt(2024, 5, 15),
                hint: "Use a hash map to store numbers and their indices as you iterate through the array.".to_string(),
                solution: "function twoSum(nums, target) {\n    const map = new Map();\n    for (let i = 0; i < nums.length; i++) {\n        const complement = target - nums[i];\n        if (map.has(complement)) {\n            return [map.get(complement), i];\n        }\n        map.set(nums[i], i);\n    }\n    return [];\n}".to_string(),
                notes: "Time complexity: O(n), Space complexity: O(n). Remember to check for the complement first before adding to map.".to_string(),
                tags: tags(&["hash-map", "array"]),
            },
            at(2024, 5, 15, 10, 30),
        ),
        (
            QuestionDraft {
                title: "Tell me about yourself".to_string(),
                description: "Common behavioral interview question asking for a brief professional summary".to_string(),
                link: None,
                category: Some("Behavioral".to_string()),
                difficulty: Some(Difficulty::Easy),
                platform: "Google Interview".to_string(),
                date_solved: NaiveDate::from_ymd_opt(2024, 5, 20),
                hint: "Structure using present, past, future framework and focus on relevant experience.".to_string(),
                solution: "Hi, I'm a software engineer with 3 years of experience building scalable web applications. Currently, I work at XYZ Company where I lead the development of our user authentication system using React and Node.js. Previously, I completed my CS degree and several internships where I gained experience in full-stack development. I'm passionate about solving complex problems and am looking to join a team where I can contribute to innovative products while continuing to grow as an engineer.".to_string(),
                notes: "Keep it concise (1-2 minutes), practice the delivery, connect to the role you're applying for.".to_string(),
                tags: tags(&["introduction", "behavioral"]),
            },
            at(2024, 5, 20, 14, 15),
        ),
        (
            QuestionDraft {
                title: "Design a URL Shortener".to_string(),
                description: "Design a system like bit.ly that takes long URLs and returns short URLs, and redirects short URLs to original URLs.".to_string(),
                link: None,
                category: Some("System Design".to_string()),
                difficulty: Some(Difficulty::Medium),
                platform: "Amazon Interview".to_string(),
                date_solved: NaiveDate::from_ymd_opt(2024, 5, 25),
                hint: "Consider scalability, database design, caching, and URL encoding strategies. Think about read vs write heavy workload.".to_string(),
                solution: "Key components:\n1. URL encoding service (Base62 encoding)\n2. Database design (URL mappings table)\n3. Caching layer (Redis for popular URLs)\n4. Load balancers\n5. CDN for global distribution\n6. Analytics service\n7. Rate limiting\n\nDatabase schema:\nurl_mappings: id, short_url, long_url, created_at, expires_at, user_id\nanalytics: id, short_url, timestamp, ip_address, user_agent".to_string(),
                notes: "Discussed trade-offs between different encoding strategies, importance of caching for read-heavy workload, and handling of expired URLs.".to_string(),
                tags: tags(&["system-design", "scalability", "database"]),
            },
            at(2024, 5, 25, 16, 45),
        ),
    ]
}

fn snippet(
    title: &str,
    language: &str,
    category: &str,
    description: &str,
    code: &str,
    complexity: &str,
) -> CodeSnippetDraft {
    CodeSnippetDraft {
        title: title.to_string(),
        language: language.to_string(),
        category: category.to_string(),
        description: Some(description.to_string()),
        condensed_code: code.to_string(),
        complexity: complexity.to_string(),
    }
}

pub fn sample_code_snippets() -> Vec<CodeSnippetDraft> {
    vec![
        snippet(
            "Binary Search",
            "cpp",
            "searching",
            "Search for a target value in a sorted array using binary search algorithm",
            r#"int binarySearch(vector<int>& arr, int target) {
    int left = 0, right = arr.size() - 1;
    while (left <= right) {
        int mid = left + (right - left) / 2;
        if (arr[mid] == target) return mid;
        if (arr[mid] < target) left = mid + 1;
        else right = mid - 1;
    }
    return -1;
}"#,
            "Time: O(log n), Space: O(1)",
        ),
        snippet(
            "Quick Sort",
            "cpp",
            "sorting",
            "Efficient divide-and-conquer sorting algorithm",
            r#"void quickSort(vector<int>& arr, int low, int high) {
    if (low < high) {
        int pi = partition(arr, low, high);
        quickSort(arr, low, pi - 1);
        quickSort(arr, pi + 1, high);
    }
}

int partition(vector<int>& arr, int low, int high) {
    int pivot = arr[high];
    int i = low - 1;
    for (int j = low; j < high; j++) {
        if (arr[j] < pivot) {
            i++;
            swap(arr[i], arr[j]);
        }
    }
    swap(arr[i + 1], arr[high]);
    return i + 1;
}"#,
            "Time: O(n log n) average, O(n²) worst case, Space: O(log n)",
        ),
        snippet(
            "Binary Search",
            "python",
            "searching",
            "Python implementation of binary search algorithm",
            r#"def binary_search(arr, target):
    left, right = 0, len(arr) - 1
    while left <= right:
        mid = (left + right) // 2
        if arr[mid] == target:
            return mid
        elif arr[mid] < target:
            left = mid + 1
        else:
            right = mid - 1
    return -1"#,
            "Time: O(log n), Space: O(1)",
        ),
        snippet(
            "Union Find",
            "cpp",
            "data-structures",
            "Disjoint Set Union data structure with path compression and union by rank",
            r#"class UnionFind {
    vector<int> parent, rank;
public:
    UnionFind(int n) : parent(n), rank(n, 0) {
        for (int i = 0; i < n; i++) parent[i] = i;
    }

    int find(int x) {
        if (parent[x] != x) parent[x] = find(parent[x]);
        return parent[x];
    }

    void unite(int x, int y) {
        int px = find(x), py = find(y);
        if (px == py) return;
        if (rank[px] < rank[py]) swap(px, py);
        parent[py] = px;
        if (rank[px] == rank[py]) rank[px]++;
    }

    bool connected(int x, int y) {
        return find(x) == find(y);
    }
};"#,
            "Time: O(α(n)) per operation, Space: O(n)",
        ),
        snippet(
            "Find First Negative",
            "python",
            "array",
            "Find the first negative number in an array",
            r#"def find_first_negative(arr):
    for i, num in enumerate(arr):
        if num < 0:
            return i
    return -1"#,
            "Time: O(n), Space: O(1)",
        ),
    ]
}
