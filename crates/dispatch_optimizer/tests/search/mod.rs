mod randomized_search_tests;
