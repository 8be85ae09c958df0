mod common;

#[cfg(test)]
mod folder_tree_tests {
    use super::common::MemoryContentApi;
    use binocle::folder_hierarchy::{
        export_file_name, export_tree, fetch_all_children, list_children, MaxDepth, WalkOptions,
    };
    use binocle::format::{Formattable, OutputFormat, OutputFormatOptions};
    use binocle::model::{ContentSummary, Folder};

    /// 1 -> {2 -> {4 -> {6}}, 3 -> {5}}
    fn nested_folders() -> MemoryContentApi {
        let api = MemoryContentApi::new();
        api.folder("1", None);
        api.folder("2", Some("1"));
        api.folder("3", Some("1"));
        api.folder("4", Some("2"));
        api.folder("5", Some("3"));
        api.folder("6", Some("4"));
        api
    }

    fn ids(node: &binocle::folder_hierarchy::FolderNode) -> Vec<&str> {
        node.descendants().iter().map(|n| n.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_depth_limits_the_listing() {
        let api = nested_folders();
        let tree = list_children(&api, "1", &WalkOptions::new(MaxDepth::Limited(2)))
            .await
            .unwrap();

        assert_eq!(ids(&tree), vec!["1", "2", "4", "3", "5"]);
        assert!(tree.descendants().iter().all(|n| n.depth <= 2));
        // The children of depth-2 folders are never requested.
        assert!(api.calls_to("get_folder_children").iter().all(|c| !c.starts_with("get_folder_children:4:")));
    }

    #[tokio::test]
    async fn test_depth_zero_lists_only_the_root() {
        let api = nested_folders();
        let tree = list_children(&api, "1", &WalkOptions::new(MaxDepth::Limited(0)))
            .await
            .unwrap();

        assert_eq!(tree.folder_count(), 1);
        assert!(tree.children.is_empty());
        assert!(api.calls_to("get_folder_children").is_empty());
    }

    #[tokio::test]
    async fn test_unbounded_depth_lists_everything() {
        let api = nested_folders();
        let tree = list_children(&api, "1", &WalkOptions::new(MaxDepth::Unbounded))
            .await
            .unwrap();

        assert_eq!(ids(&tree), vec!["1", "2", "4", "6", "3", "5"]);
        let deepest = tree.descendants().into_iter().find(|n| n.id == "6").unwrap();
        assert_eq!(deepest.depth, 3);
        assert_eq!(deepest.parent_id.as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn test_children_are_paginated_in_order() {
        let api = MemoryContentApi::new();
        api.folder("1", None);
        for i in 0..100 {
            api.folder(&format!("c{:03}", i), Some("1"));
        }

        let children = fetch_all_children(&api, "1", 50).await.unwrap();

        assert_eq!(children.len(), 100);
        assert_eq!(children[0].id, "c000");
        assert_eq!(children[99].id, "c099");
        assert_eq!(
            api.calls_to("get_folder_children"),
            vec![
                "get_folder_children:1:1",
                "get_folder_children:1:2",
                "get_folder_children:1:3"
            ]
        );
    }

    #[tokio::test]
    async fn test_short_page_ends_pagination() {
        let api = MemoryContentApi::new();
        api.folder("1", None);
        for i in 0..7 {
            api.folder(&format!("c{}", i), Some("1"));
        }

        let children = fetch_all_children(&api, "1", 5).await.unwrap();

        assert_eq!(children.len(), 7);
        assert_eq!(api.calls_to("get_folder_children").len(), 2);
    }

    #[tokio::test]
    async fn test_missing_root_is_not_found() {
        let api = MemoryContentApi::new();
        let result = list_children(&api, "404", &WalkOptions::new(MaxDepth::Limited(2))).await;
        assert!(matches!(
            result,
            Err(binocle::api::ApiError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_content_counts_and_entries() {
        let api = MemoryContentApi::new();
        let mut folder = Folder::new("1", "Marketing", None);
        folder.looks.push(ContentSummary {
            id: "10".to_string(),
            title: Some("Leads".to_string()),
        });
        folder.dashboards.push(ContentSummary {
            id: "20".to_string(),
            title: Some("Campaigns".to_string()),
        });
        api.add_folder(folder);

        let options = WalkOptions::new(MaxDepth::Limited(1)).with_content(true);
        let tree = list_children(&api, "1", &options).await.unwrap();

        assert_eq!((tree.dashboards, tree.looks), (1, 1));
        let rendered = tree
            .format(&OutputFormat::Tree(OutputFormatOptions::default()))
            .unwrap();
        assert!(rendered.contains("Marketing #1 (D:1 - L:1)"));
        assert!(rendered.contains("Leads #10"));
        assert!(rendered.contains("Campaigns #20"));
    }

    #[tokio::test]
    async fn test_tree_is_exported_to_a_file() {
        let api = nested_folders();
        let tree = list_children(&api, "1", &WalkOptions::new(MaxDepth::Limited(1)))
            .await
            .unwrap();
        let dir = tempfile::tempdir().unwrap();

        let path = export_tree(&tree, dir.path(), 1234).unwrap();

        assert_eq!(path, dir.path().join(export_file_name("1", 1234)));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("Folder 1 #1"));
        assert!(content.contains("Folder 3 #3"));
        assert!(!content.contains("#4"));
    }
}
